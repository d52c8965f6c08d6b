use crate::{config::Config, templates::IndexPage};

#[derive(Clone)]
pub struct AppState {
    pub index_page: IndexPage,
    pub config: Config,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let index_page = IndexPage::new(config.dev_mode.auto_reload, config.template_path.clone());
        Self { index_page, config }
    }
}
