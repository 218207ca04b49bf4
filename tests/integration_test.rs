#[cfg(test)]
mod tests {

    use std::{fs::File, io::Read, path::PathBuf};

    use moviedb::{
        cli::Command,
        config::Config,
        error::Error,
        persisters::{
            csv_storage::CsvStorage, json_storage::JsonStorage, MovieStorage, StorageFormat,
        },
        store::{RecordStore, SortKey, SortOrder},
    };
    use select::{
        document::Document,
        predicate::{Class, Name},
    };
    use wiremock::{
        matchers::{method, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn resource(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("resources")
            .join(name)
    }

    fn get_file_content(file_path: &PathBuf) -> String {
        let mut file = match File::open(file_path) {
            Ok(file) => file,
            Err(e) => panic!("Error opening file {}: {}", file_path.display(), e),
        };

        let mut content = String::new();
        if let Err(e) = file.read_to_string(&mut content) {
            panic!("Failed to read file {}: {}", file_path.display(), e);
        }

        content
    }

    async fn omdb_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("t", "Arrival"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"Title":"Arrival","Year":"2016","Genre":"Drama, Sci-Fi",
                    "Director":"Denis Villeneuve","imdbRating":"7.9",
                    "Poster":"https://img.example/arrival.jpg","Response":"True"}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("t", "Nonexistent Film 12345"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"Response":"False","Error":"Movie not found!"}"#),
            )
            .mount(&server)
            .await;
        server
    }

    fn config_for(server: &MockServer, dir: &tempfile::TempDir, format: StorageFormat) -> Config {
        Config {
            api_key: Some("test-key".to_string()),
            api_url: format!("{}/", server.uri()),
            data_dir: dir.path().join("data"),
            format,
            ..Config::default()
        }
    }

    #[test]
    fn csv_and_json_fixtures_hold_the_same_movies() {
        let from_csv = CsvStorage::new(resource("movies.csv")).load().unwrap();
        let from_json = JsonStorage::new(resource("movies.json")).load().unwrap();

        assert_eq!(from_csv, from_json);
        assert_eq!(from_csv.len(), 3);
    }

    #[test]
    fn fixture_sorts_with_insertion_order_tie_break() {
        let store = RecordStore::open(Box::new(CsvStorage::new(resource("movies.csv")))).unwrap();

        let by_year: Vec<&str> = store
            .sort(SortKey::Year, SortOrder::Ascending)
            .into_iter()
            .map(|m| m.title.as_str())
            .collect();
        let by_rating: Vec<&str> = store
            .sort(SortKey::Rating, SortOrder::Descending)
            .into_iter()
            .map(|m| m.title.as_str())
            .collect();

        assert_eq!(by_year, vec!["A", "B", "C"]);
        assert_eq!(by_rating, vec!["B", "A", "C"]);
    }

    #[test]
    fn truncated_fixture_is_corrupt() {
        let err = RecordStore::open(Box::new(JsonStorage::new(resource("truncated.json"))))
            .err()
            .unwrap();

        assert!(matches!(err, Error::CorruptData { .. }));
    }

    #[tokio::test]
    async fn adds_movie_and_renders_site() {
        let server = omdb_server().await;
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir, StorageFormat::Csv);

        moviedb::execute(
            &config,
            Command::Add {
                title: "Arrival".to_string(),
            },
        )
        .await
        .unwrap();

        let saved = CsvStorage::new(config.data_file_path()).load().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].director, "Denis Villeneuve");
        assert_eq!(saved[0].rating, 7.9);

        let site = dir.path().join("site");
        moviedb::execute(
            &config,
            Command::Render {
                output: site.clone(),
                template: None,
                title: None,
            },
        )
        .await
        .unwrap();

        let html = get_file_content(&site.join("index.html"));
        let document = Document::from(html.as_str());
        let titles: Vec<String> = document
            .find(Class("movie-title"))
            .map(|n| n.text())
            .collect();
        assert_eq!(titles, vec!["Arrival"]);
    }

    #[tokio::test]
    async fn duplicate_add_is_rejected() {
        let server = omdb_server().await;
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir, StorageFormat::Json);
        let add = Command::Add {
            title: "Arrival".to_string(),
        };

        moviedb::execute(&config, add).await.unwrap();
        let err = moviedb::execute(
            &config,
            Command::Add {
                title: "arrival".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Duplicate(_)));
        let saved = JsonStorage::new(config.data_file_path()).load().unwrap();
        assert_eq!(saved.len(), 1);
    }

    #[tokio::test]
    async fn unknown_title_surfaces_not_found() {
        let server = omdb_server().await;
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir, StorageFormat::Json);

        let err = moviedb::execute(
            &config,
            Command::Add {
                title: "Nonexistent Film 12345".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn listing_without_api_key_works_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("fresh"),
            ..Config::default()
        };

        moviedb::execute(&config, Command::List).await.unwrap();

        assert!(dir.path().join("fresh").is_dir());
    }

    #[tokio::test]
    async fn add_without_api_key_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("data"),
            ..Config::default()
        };

        let err = moviedb::execute(
            &config,
            Command::Add {
                title: "Arrival".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn export_converts_between_formats() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_file: Some(resource("movies.json")),
            ..Config::default()
        };
        let target = dir.path().join("converted.csv");

        moviedb::execute(
            &config,
            Command::Export {
                path: target.clone(),
                to: None,
            },
        )
        .await
        .unwrap();

        let exported = CsvStorage::new(target).load().unwrap();
        let original = JsonStorage::new(resource("movies.json")).load().unwrap();
        assert_eq!(exported, original);
    }

    #[tokio::test]
    async fn rendering_empty_collection_shows_no_movies() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("data"),
            ..Config::default()
        };
        let site = dir.path().join("site");

        moviedb::execute(
            &config,
            Command::Render {
                output: site.clone(),
                template: None,
                title: None,
            },
        )
        .await
        .unwrap();

        let html = get_file_content(&site.join("index.html"));
        let document = Document::from(html.as_str());
        assert_eq!(document.find(Class("movie")).count(), 0);
        assert!(html.contains("</html>"));
    }

    #[tokio::test]
    async fn render_title_flag_sets_page_heading() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_file: Some(resource("movies.json")),
            ..Config::default()
        };
        let site = dir.path().join("site");

        moviedb::execute(
            &config,
            Command::Render {
                output: site.clone(),
                template: None,
                title: Some("Films".to_string()),
            },
        )
        .await
        .unwrap();

        let html = get_file_content(&site.join("index.html"));
        let document = Document::from(html.as_str());
        assert_eq!(document.find(Name("h1")).next().unwrap().text(), "Films");
        assert_eq!(document.find(Class("movie")).count(), 3);
    }
}
