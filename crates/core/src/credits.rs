//! Credit pricing for generation requests.
//!
//! Pricing is linear: a job costs `duration × credits_per_second`,
//! rounded to the nearest whole credit. The rate comes from the model
//! catalog entry.

use crate::catalog::VideoModel;
use crate::request::GenerationRequest;

/// Price a job of `duration_secs` at `credits_per_second`, rounded to
/// the nearest whole credit.
pub fn estimate_credits(duration_secs: u32, credits_per_second: f64) -> i64 {
    (duration_secs as f64 * credits_per_second).round() as i64
}

/// Price a request against its catalog model entry.
pub fn estimate_for_model(request: &GenerationRequest, model: &VideoModel) -> i64 {
    estimate_credits(request.duration_secs, model.credits_per_second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_at_half() {
        // 8 * 1.5 = 12.0
        assert_eq!(estimate_credits(8, 1.5), 12);
    }

    #[test]
    fn rounds_fractional_totals_to_nearest() {
        // 3 * 0.33 = 0.99 -> 1
        assert_eq!(estimate_credits(3, 0.33), 1);
        // 5 * 1.3 = 6.5 -> 7 (round half away from zero)
        assert_eq!(estimate_credits(5, 1.3), 7);
        // 6 * 0.8 = 4.8 -> 5
        assert_eq!(estimate_credits(6, 0.8), 5);
    }

    #[test]
    fn zero_rate_prices_to_zero() {
        assert_eq!(estimate_credits(10, 0.0), 0);
    }

    #[test]
    fn estimate_for_model_uses_catalog_rate() {
        let model: VideoModel = serde_json::from_value(serde_json::json!({
            "id": "runway-gen3",
            "name": "Runway Gen-3 Alpha",
            "provider": "Runway",
            "quality_rating": 4.9,
            "credits_per_second": 1.5,
            "estimated_time": "1-2 minutes",
            "max_duration": 8
        }))
        .unwrap();
        let request = GenerationRequest::new("script", "runway-gen3", "a", "v", 8);
        assert_eq!(estimate_for_model(&request, &model), 12);
    }
}
