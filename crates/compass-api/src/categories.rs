//! Handler for `GET /categories`.

use axum::Json;
use compass_core::resource::Category;
use strum::IntoEnumIterator;

/// `GET /categories`: the closed category set, in declaration order.
pub async fn list() -> Json<Vec<Category>> { Json(Category::iter().collect()) }
