// src/services/search_service.rs
// DOCUMENTATION: Address search and search history
// PURPOSE: Record what a user was shown and what they picked

use crate::db::{Database, SearchRepository, Transaction, UserRepository};
use crate::errors::AppError;
use crate::models::{SearchHistory, SearchResponse};
use crate::services::AddressSearch;

pub struct SearchService;

impl SearchService {
    /// Search addresses for a keyword and record each result
    pub async fn search<D: Database>(
        db: &D,
        provider: &dyn AddressSearch,
        count: u32,
        user_id: i64,
        search_word: &str,
    ) -> Result<Vec<SearchResponse>, AppError> {
        let keyword = search_word.trim();
        if keyword.is_empty() {
            return Err(AppError::ValidationError(
                "searchWord must not be blank".to_string(),
            ));
        }

        {
            let mut tx = db.begin().await?;
            if tx.find_user(user_id).await?.is_none() {
                return Err(AppError::UserNotFound(user_id));
            }
        }

        // No transaction is held across the provider round-trip
        let addresses = provider.search(keyword, count).await?;

        let mut tx = db.begin().await?;
        let mut recorded = Vec::with_capacity(addresses.len());
        for address in addresses.iter().take(count as usize) {
            recorded.push(tx.insert_search(user_id, address).await?);
        }
        tx.commit().await?;

        log::info!(
            "User {} searched '{}' ({} results)",
            user_id,
            keyword,
            recorded.len()
        );
        Ok(recorded.iter().map(SearchHistory::to_response).collect())
    }

    /// The user's most recently clicked search
    pub async fn recent<D: Database>(db: &D, user_id: i64) -> Result<SearchResponse, AppError> {
        let mut tx = db.begin().await?;
        let latest = tx.latest_clicked_search(user_id).await?.ok_or_else(|| {
            AppError::SearchHistoryNotFound(format!("no clicked search for user {}", user_id))
        })?;
        tx.commit().await?;

        Ok(latest.to_response())
    }

    /// Mark a search result as picked
    pub async fn click<D: Database>(db: &D, search_id: i64) -> Result<SearchResponse, AppError> {
        let mut tx = db.begin().await?;
        let search = tx.mark_search_clicked(search_id).await?;
        tx.commit().await?;

        log::info!("Search {} clicked by user {}", search.id, search.user_id);
        Ok(search.to_response())
    }
}
