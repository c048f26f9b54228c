// src/handlers/purchase.rs
// DOCUMENTATION: HTTP handler for in-app purchase verification

use super::AuthUser;
use crate::db::Database;
use crate::errors::AppError;
use crate::models::{ApiResponse, PurchaseRequest};
use crate::services::{PurchaseService, ReceiptValidator};
use actix_web::{web, HttpResponse, Responder};

/// POST /api/purchase/verify
/// Validate a store receipt and credit the product's points to the caller
pub async fn verify_purchase<D: Database>(
    db: web::Data<D>,
    receipts: web::Data<dyn ReceiptValidator>,
    user: AuthUser,
    req: web::Json<PurchaseRequest>,
) -> Result<impl Responder, AppError> {
    let change = PurchaseService::verify_purchase(
        db.get_ref(),
        receipts.get_ref(),
        user.id(),
        req.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(change)))
}

pub fn config<D: Database>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/purchase").route("/verify", web::post().to(verify_purchase::<D>)),
    );
}
