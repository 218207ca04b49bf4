use std::fs;
use std::path::{Path, PathBuf};

use maud::{html, Markup};

use crate::error::{Error, Result};
use crate::model::movie::Movie;

pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>__TEMPLATE_TITLE__</title>
  <link rel="stylesheet" href="style.css">
</head>
<body>
  <div class="list-movies-title">
    <h1>__TEMPLATE_TITLE__</h1>
  </div>
  <div>
    <ol class="movie-grid">
__TEMPLATE_MOVIE_GRID__
    </ol>
  </div>
</body>
</html>
"#;

const STYLESHEET: &str = r#"body {
  background: #f5f5f0;
  font-family: "Helvetica Neue", Arial, sans-serif;
  margin: 0;
}

.list-movies-title {
  background: #009b50;
  color: #fff;
  padding: 10px 20px;
}

.movie-grid {
  list-style: none;
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  padding: 0;
}

.movie {
  width: 200px;
  margin: 20px;
}

.movie-poster {
  width: 200px;
  height: 300px;
  object-fit: cover;
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.3);
}

.movie-title {
  font-weight: bold;
  margin-top: 8px;
}

.movie-year,
.movie-genre,
.movie-director,
.movie-rating {
  color: #555;
  font-size: 0.9em;
}

.empty-collection {
  text-align: center;
  color: #888;
}
"#;

/// One generated file, relative to the site output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Renders the collection to static HTML. Holds no state between renders.
#[derive(Debug, Clone)]
pub struct SiteRenderer {
    title: String,
    template: String,
}

impl SiteRenderer {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Uses a user-supplied page template. It must contain the grid placeholder.
    pub fn with_template(title: &str, template: String) -> Result<Self> {
        if !template.contains(GRID_PLACEHOLDER) {
            return Err(Error::InvalidInput(format!(
                "template is missing the {} placeholder",
                GRID_PLACEHOLDER
            )));
        }
        Ok(Self {
            title: title.to_string(),
            template,
        })
    }

    pub fn from_template_file(title: &str, path: &Path) -> Result<Self> {
        let template = fs::read_to_string(path)?;
        SiteRenderer::with_template(title, template)
    }

    pub fn render(&self, movies: &[Movie]) -> Vec<SiteFile> {
        let grid = if movies.is_empty() {
            html! {
                li."empty-collection" { "No movies in the collection yet." }
            }
        } else {
            html! {
                @for movie in movies {
                    (movie_card(movie))
                }
            }
        };
        let title = html! { (self.title) };

        let index = self
            .template
            .replace(TITLE_PLACEHOLDER, &title.into_string())
            .replace(GRID_PLACEHOLDER, &grid.into_string());

        vec![
            SiteFile {
                path: PathBuf::from("index.html"),
                contents: index,
            },
            SiteFile {
                path: PathBuf::from("style.css"),
                contents: STYLESHEET.to_string(),
            },
        ]
    }
}

fn movie_card(movie: &Movie) -> Markup {
    html! {
        li {
            div.movie {
                @if let Some(poster) = &movie.poster_url {
                    img."movie-poster" src=(poster) alt=(movie.title);
                }
                div."movie-title" { (movie.title) }
                div."movie-year" { (movie.year) }
                @if !movie.genre.is_empty() {
                    div."movie-genre" { (movie.genre) }
                }
                @if !movie.director.is_empty() {
                    div."movie-director" { (movie.director) }
                }
                div."movie-rating" { (format!("{:.1}", movie.rating)) }
            }
        }
    }
}

/// Writes rendered files under `output_dir`, creating it if needed.
pub fn write_site(output_dir: &Path, files: &[SiteFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let mut written = vec![];
    for file in files {
        let path = output_dir.join(&file.path);
        fs::write(&path, &file.contents)?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
