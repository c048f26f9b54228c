// src/db/memory.rs
// DOCUMENTATION: In-memory implementation of the transaction seam
// PURPOSE: Backs STORAGE=memory and the test suites

use super::{
    Database, OrderRepository, RestroomRepository, ReviewRepository, SearchRepository,
    Transaction, UserRepository,
};
use crate::errors::AppError;
use crate::models::*;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: Table<User>,
    restrooms: Table<Restroom>,
    reviews: Table<Review>,
    searches: Table<SearchHistory>,
    orders: Table<Order>,
}

/// Process-local store
/// DOCUMENTATION: A transaction holds the store lock for its whole lifetime
/// and works on a copy of the state; `commit` swaps the copy in. Dropping
/// an uncommitted transaction leaves the store untouched.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of review rows, active or not
    pub async fn review_row_count(&self) -> usize {
        self.state.lock().await.reviews.rows.len()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Tx = MemoryTransaction;

    async fn begin(&self) -> Result<MemoryTransaction, AppError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(MemoryTransaction { guard, working })
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(mut self) -> Result<(), AppError> {
        *self.guard = self.working;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryTransaction {
    async fn find_user(&mut self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.working.users.rows.get(&id).filter(|u| u.active).cloned())
    }

    async fn insert_user(&mut self, user: &NewUser) -> Result<User, AppError> {
        let now = Utc::now();
        let table = &mut self.working.users;
        let row = User {
            id: table.next_id(),
            nickname: user.nickname.clone(),
            point: user.point,
            active: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn add_points(&mut self, id: i64, points: i32) -> Result<User, AppError> {
        let user = self
            .working
            .users
            .rows
            .get_mut(&id)
            .filter(|u| u.active)
            .ok_or(AppError::UserNotFound(id))?;

        user.point += points;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl RestroomRepository for MemoryTransaction {
    async fn find_restroom(&mut self, id: i64) -> Result<Option<Restroom>, AppError> {
        Ok(self.working.restrooms.rows.get(&id).filter(|r| r.active).cloned())
    }

    // The transaction already holds the whole store
    async fn find_restroom_for_update(&mut self, id: i64) -> Result<Option<Restroom>, AppError> {
        self.find_restroom(id).await
    }

    async fn insert_restroom(&mut self, restroom: &NewRestroom) -> Result<Restroom, AppError> {
        let now = Utc::now();
        let table = &mut self.working.restrooms;
        let row = Restroom {
            id: table.next_id(),
            name: restroom.name.clone(),
            road_address: restroom.road_address.clone(),
            latitude: restroom.latitude,
            longitude: restroom.longitude,
            average_rating: 0.0,
            active: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_average_rating(&mut self, id: i64, average: f32) -> Result<(), AppError> {
        let restroom = self
            .working
            .restrooms
            .rows
            .get_mut(&id)
            .filter(|r| r.active)
            .ok_or(AppError::RestroomNotFound(id))?;

        restroom.average_rating = average;
        restroom.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for MemoryTransaction {
    async fn find_review(&mut self, id: i64) -> Result<Option<Review>, AppError> {
        Ok(self.working.reviews.rows.get(&id).filter(|r| r.active).cloned())
    }

    async fn insert_review(&mut self, review: &NewReview) -> Result<Review, AppError> {
        let now = Utc::now();
        let table = &mut self.working.reviews;
        let row = Review {
            id: table.next_id(),
            user_id: review.user_id,
            restroom_id: review.restroom_id,
            content: review.content.clone(),
            rating: review.rating,
            active: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_review(&mut self, id: i64, edit: &ReviewEdit) -> Result<Review, AppError> {
        let review = self
            .working
            .reviews
            .rows
            .get_mut(&id)
            .filter(|r| r.active)
            .ok_or(AppError::ReviewNotFound(id))?;

        review.content = edit.content.clone();
        review.rating = edit.rating;
        review.updated_at = Utc::now();
        Ok(review.clone())
    }

    async fn deactivate_review(&mut self, id: i64) -> Result<(), AppError> {
        let review = self
            .working
            .reviews
            .rows
            .get_mut(&id)
            .filter(|r| r.active)
            .ok_or(AppError::ReviewNotFound(id))?;

        review.active = false;
        review.updated_at = Utc::now();
        Ok(())
    }

    async fn reviews_by_restroom(&mut self, restroom_id: i64) -> Result<Vec<Review>, AppError> {
        Ok(self
            .working
            .reviews
            .rows
            .values()
            .filter(|r| r.active && r.restroom_id == restroom_id)
            .cloned()
            .collect())
    }

    async fn reviews_by_user(&mut self, user_id: i64) -> Result<Vec<Review>, AppError> {
        Ok(self
            .working
            .reviews
            .rows
            .values()
            .filter(|r| r.active && r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SearchRepository for MemoryTransaction {
    async fn insert_search(
        &mut self,
        user_id: i64,
        address: &AddressResult,
    ) -> Result<SearchHistory, AppError> {
        let now = Utc::now();
        let table = &mut self.working.searches;
        let row = SearchHistory {
            id: table.next_id(),
            user_id,
            name: address.name.clone(),
            road_address: address.road_address.clone(),
            land_lot_address: address.land_lot_address.clone(),
            clicked: false,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn mark_search_clicked(&mut self, id: i64) -> Result<SearchHistory, AppError> {
        let search = self
            .working
            .searches
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::SearchHistoryNotFound(format!("id {}", id)))?;

        search.clicked = true;
        search.updated_at = Utc::now();
        Ok(search.clone())
    }

    async fn latest_clicked_search(
        &mut self,
        user_id: i64,
    ) -> Result<Option<SearchHistory>, AppError> {
        Ok(self
            .working
            .searches
            .rows
            .values()
            .filter(|s| s.user_id == user_id && s.clicked)
            .max_by_key(|s| (s.updated_at, s.id))
            .cloned())
    }
}

#[async_trait]
impl OrderRepository for MemoryTransaction {
    async fn find_order_by_token(&mut self, token: &str) -> Result<Option<Order>, AppError> {
        Ok(self
            .working
            .orders
            .rows
            .values()
            .find(|o| o.purchase_token == token)
            .cloned())
    }

    async fn insert_order(&mut self, order: &NewOrder) -> Result<Order, AppError> {
        if self
            .working
            .orders
            .rows
            .values()
            .any(|o| o.purchase_token == order.purchase_token)
        {
            return Err(AppError::DuplicatePurchase);
        }

        let table = &mut self.working.orders;
        let row = Order {
            id: table.next_id(),
            user_id: order.user_id,
            purchase_token: order.purchase_token.clone(),
            product_id: order.product_id.clone(),
            point: order.point,
            created_at: Utc::now(),
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }
}
