// src/services/purchase_service.rs
// DOCUMENTATION: In-app purchase business logic
// PURPOSE: Validate a receipt once, credit points and record the order

use crate::db::{Database, OrderRepository, Transaction, UserRepository};
use crate::errors::AppError;
use crate::models::{NewOrder, PointChangeResponse, Product, PurchaseRequest};
use crate::services::ReceiptValidator;
use validator::Validate;

pub struct PurchaseService;

impl PurchaseService {
    /// Verify a purchase and credit its points
    /// DOCUMENTATION: A rejected receipt writes nothing and reports 0
    /// points. A token that already produced an order is refused so the
    /// same receipt cannot be redeemed twice. The store round-trip happens
    /// with no transaction open; the token is checked again before the
    /// credit is written.
    pub async fn verify_purchase<D: Database>(
        db: &D,
        receipts: &dyn ReceiptValidator,
        user_id: i64,
        req: PurchaseRequest,
    ) -> Result<PointChangeResponse, AppError> {
        req.validate().map_err(|e| AppError::from_validation(&e))?;

        let product = Product::from_product_id(&req.product_id).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown productId: {}", req.product_id))
        })?;

        // Fail fast before asking the store
        {
            let mut tx = db.begin().await?;
            if tx.find_user(user_id).await?.is_none() {
                return Err(AppError::UserNotFound(user_id));
            }
            Self::ensure_unredeemed(&mut tx, user_id, &req.purchase_token).await?;
        }

        if !receipts.validate(&req).await? {
            log::info!("Receipt for {} rejected; no points credited", req.product_id);
            return Ok(PointChangeResponse { user_id, point: 0 });
        }

        let mut tx = db.begin().await?;
        Self::ensure_unredeemed(&mut tx, user_id, &req.purchase_token).await?;

        let user = tx.add_points(user_id, product.points()).await?;
        tx.insert_order(&NewOrder {
            user_id,
            purchase_token: req.purchase_token,
            product_id: product.product_id().to_string(),
            point: product.points(),
        })
        .await?;
        tx.commit().await?;

        log::info!(
            "Credited {} points to user {} (balance {})",
            product.points(),
            user_id,
            user.point
        );
        Ok(PointChangeResponse {
            user_id,
            point: product.points(),
        })
    }

    async fn ensure_unredeemed<T: Transaction>(
        tx: &mut T,
        user_id: i64,
        token: &str,
    ) -> Result<(), AppError> {
        if tx.find_order_by_token(token).await?.is_some() {
            log::warn!("User {} replayed a redeemed purchase token", user_id);
            return Err(AppError::DuplicatePurchase);
        }
        Ok(())
    }
}
