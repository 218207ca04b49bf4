pub mod site_renderer;
