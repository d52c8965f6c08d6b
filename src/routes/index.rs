use std::borrow::Cow;

use axum::{extract::State, response::Html};

use crate::{app_state::AppState, error::AppError};

pub async fn index(State(state): State<AppState>) -> Result<Html<Cow<'static, str>>, AppError> {
    let page = state.index_page.render().await?;
    Ok(Html(page))
}
