// src/handlers/search.rs
// DOCUMENTATION: HTTP handlers for address search
// PURPOSE: Keyword search, recent pick and click recording

use super::{positive_id, AuthUser};
use crate::config::Config;
use crate::db::Database;
use crate::errors::AppError;
use crate::models::{ApiResponse, SearchQuery};
use crate::services::{AddressSearch, SearchService};
use actix_web::{web, HttpResponse, Responder};

/// GET /address/search?searchWord=...
/// Search the address provider and record every result for the caller
pub async fn search_address<D: Database>(
    db: web::Data<D>,
    config: web::Data<Config>,
    provider: web::Data<dyn AddressSearch>,
    user: AuthUser,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let results = SearchService::search(
        db.get_ref(),
        provider.get_ref(),
        config.address_search_count,
        user.id(),
        &query.search_word,
    )
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(results)))
}

/// GET /address/search/recent
pub async fn recent_search<D: Database>(
    db: web::Data<D>,
    user: AuthUser,
) -> Result<impl Responder, AppError> {
    let recent = SearchService::recent(db.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(recent)))
}

/// POST /address/search/click/{searchId}
pub async fn click_search<D: Database>(
    db: web::Data<D>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = positive_id(path.into_inner(), "searchId")?;
    let clicked = SearchService::click(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(clicked)))
}

pub fn config<D: Database>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/address")
            .route("/search", web::get().to(search_address::<D>))
            .route("/search/recent", web::get().to(recent_search::<D>))
            .route("/search/click/{search_id}", web::post().to(click_search::<D>)),
    );
}
