// src/services/rating.rs
// DOCUMENTATION: Restroom rating aggregation and review ordering
// PURPOSE: Keep restroom.average_rating equal to the mean of its active reviews

use crate::db::{RestroomRepository, ReviewRepository};
use crate::errors::AppError;
use crate::models::Review;

/// Orderings offered by the review listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOrder {
    /// Newest first (reverse insertion order)
    Latest,
    /// Rating descending; exact reverse of `LowRating`
    HighRating,
    /// Rating ascending, ties broken by insertion order
    LowRating,
}

/// Arithmetic mean of the ratings, 0 for an empty set
pub fn average_rating<I>(ratings: I) -> f32
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0u32), |(sum, count), r| (sum + i64::from(r), count + 1));

    if count == 0 {
        0.0
    } else {
        (sum as f64 / f64::from(count)) as f32
    }
}

/// Order a restroom's reviews for one of the listing endpoints
pub fn sort_reviews(mut reviews: Vec<Review>, order: ReviewOrder) -> Vec<Review> {
    match order {
        ReviewOrder::Latest => reviews.sort_by(|a, b| b.id.cmp(&a.id)),
        ReviewOrder::LowRating => {
            reviews.sort_by(|a, b| a.rating.cmp(&b.rating).then(a.id.cmp(&b.id)))
        }
        ReviewOrder::HighRating => {
            reviews.sort_by(|a, b| b.rating.cmp(&a.rating).then(b.id.cmp(&a.id)))
        }
    }
    reviews
}

/// Recompute and store a restroom's average rating
/// DOCUMENTATION: Runs inside the caller's transaction right after a review
/// write, so the stored average always matches the committed review set.
pub async fn refresh_average_rating<T>(tx: &mut T, restroom_id: i64) -> Result<f32, AppError>
where
    T: RestroomRepository + ReviewRepository,
{
    if tx.find_restroom_for_update(restroom_id).await?.is_none() {
        return Err(AppError::RestroomNotFound(restroom_id));
    }

    let reviews = tx.reviews_by_restroom(restroom_id).await?;
    let average = average_rating(reviews.iter().map(|r| r.rating));

    tx.update_average_rating(restroom_id, average).await?;

    log::debug!(
        "Restroom {} average rating is now {:.2} over {} reviews",
        restroom_id,
        average,
        reviews.len()
    );
    Ok(average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewRestroom, NewReview, Restroom, ReviewEdit};
    use async_trait::async_trait;
    use chrono::Utc;

    /// Records the order of repository calls made against one restroom
    #[derive(Default)]
    struct CallLog {
        calls: Vec<&'static str>,
        reviews: Vec<Review>,
    }

    fn restroom() -> Restroom {
        let now = Utc::now();
        Restroom {
            id: 1,
            name: "Sillim Station".into(),
            road_address: None,
            latitude: 37.48,
            longitude: 126.93,
            average_rating: 0.0,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[async_trait]
    impl RestroomRepository for CallLog {
        async fn find_restroom(&mut self, _id: i64) -> Result<Option<Restroom>, AppError> {
            self.calls.push("find");
            Ok(Some(restroom()))
        }

        async fn find_restroom_for_update(&mut self, _id: i64) -> Result<Option<Restroom>, AppError> {
            self.calls.push("lock");
            Ok(Some(restroom()))
        }

        async fn insert_restroom(&mut self, _restroom: &NewRestroom) -> Result<Restroom, AppError> {
            unreachable!("not used by rating refresh")
        }

        async fn update_average_rating(&mut self, _id: i64, _average: f32) -> Result<(), AppError> {
            self.calls.push("update");
            Ok(())
        }
    }

    #[async_trait]
    impl ReviewRepository for CallLog {
        async fn find_review(&mut self, _id: i64) -> Result<Option<Review>, AppError> {
            unreachable!("not used by rating refresh")
        }

        async fn insert_review(&mut self, _review: &NewReview) -> Result<Review, AppError> {
            unreachable!("not used by rating refresh")
        }

        async fn update_review(&mut self, _id: i64, _edit: &ReviewEdit) -> Result<Review, AppError> {
            unreachable!("not used by rating refresh")
        }

        async fn deactivate_review(&mut self, _id: i64) -> Result<(), AppError> {
            unreachable!("not used by rating refresh")
        }

        async fn reviews_by_restroom(&mut self, _restroom_id: i64) -> Result<Vec<Review>, AppError> {
            self.calls.push("reviews");
            Ok(self.reviews.clone())
        }

        async fn reviews_by_user(&mut self, _user_id: i64) -> Result<Vec<Review>, AppError> {
            unreachable!("not used by rating refresh")
        }
    }

    #[tokio::test]
    async fn test_refresh_locks_restroom_before_reading_reviews() {
        let mut log = CallLog {
            reviews: vec![review(1, 5), review(2, 2)],
            ..CallLog::default()
        };

        let average = refresh_average_rating(&mut log, 1).await.unwrap();
        assert_eq!(average, 3.5);
        assert_eq!(log.calls, vec!["lock", "reviews", "update"]);
    }

    fn review(id: i64, rating: i32) -> Review {
        let now = Utc::now();
        Review {
            id,
            user_id: 1,
            restroom_id: 1,
            content: format!("review {}", id),
            rating,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(reviews: &[Review]) -> Vec<i64> {
        reviews.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(vec![5, 3, 4]), 4.0);
        assert_eq!(average_rating(vec![3, 4]), 3.5);
        assert_eq!(average_rating(vec![0]), 0.0);
        assert_eq!(average_rating(Vec::new()), 0.0);
    }

    #[test]
    fn test_latest_is_reverse_insertion() {
        let sorted = sort_reviews(vec![review(1, 3), review(2, 5), review(3, 1)], ReviewOrder::Latest);
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_rating_orders() {
        let set = vec![review(1, 4), review(2, 5), review(3, 1), review(4, 4)];

        let low = sort_reviews(set.clone(), ReviewOrder::LowRating);
        assert_eq!(ids(&low), vec![3, 1, 4, 2]);

        let high = sort_reviews(set, ReviewOrder::HighRating);
        assert_eq!(ids(&high), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_high_and_low_are_exact_reverses_with_ties() {
        let set: Vec<Review> = (1..=12).map(|id| review(id, (id * 7 % 6) as i32)).collect();

        let low = sort_reviews(set.clone(), ReviewOrder::LowRating);
        let mut high = sort_reviews(set, ReviewOrder::HighRating);
        high.reverse();

        assert_eq!(ids(&low), ids(&high));
    }
}
