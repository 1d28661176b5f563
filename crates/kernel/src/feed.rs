use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use vigil_core_types::CameraId;

/// Simulated live-feed sources assigned to camera tiles by rotation.
const FEED_POOL: [&str; 12] = [
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerMeltdowns.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/SubaruOutbackOnStreetAndDirt.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/TearsOfSteel.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/VolkswagenGTIReview.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/WeAreGoingOnBullrun.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/WhatCarCanYouGetForAGrand.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
];

/// Stable feed URL for a camera: registry-assigned ids rotate through the
/// pool by suffix, other ids fall back to a hash of the id string.
pub fn feed_url(id: &CameraId) -> &'static str {
    let slot = match id.suffix() {
        Some(suffix) => suffix.saturating_sub(1),
        None => {
            let mut hasher = DefaultHasher::new();
            id.0.hash(&mut hasher);
            hasher.finish() as usize
        }
    };
    FEED_POOL[slot % FEED_POOL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_ids_rotate_through_the_pool() {
        assert_eq!(feed_url(&CameraId::from_index(1)), FEED_POOL[0]);
        assert_eq!(feed_url(&CameraId::from_index(12)), FEED_POOL[11]);
        assert_eq!(feed_url(&CameraId::from_index(13)), FEED_POOL[0]);
    }

    #[test]
    fn assignment_is_stable_for_any_id() {
        let id = CameraId("gate-overview".to_string());
        assert_eq!(feed_url(&id), feed_url(&id));
    }
}
