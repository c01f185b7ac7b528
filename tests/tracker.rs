mod support;

use leafpress::application::use_cases::categories::create_category::CreateCategory;
use leafpress::application::use_cases::nodes::create_node::CreateNode;
use leafpress::application::use_cases::tracker::add_favorite::AddFavorite;
use leafpress::application::use_cases::tracker::list_favorites::ListFavorites;
use leafpress::application::use_cases::tracker::list_recent::ListRecent;
use leafpress::application::use_cases::tracker::remove_favorite::RemoveFavorite;
use leafpress::application::use_cases::tracker::track_access::{TrackAccess, RECENT_KEEP};

use support::{new_category, new_node, MemoryCategoryRepository, MemoryNodeRepository, MemoryTrackerRepository};

const USER: i32 = 1;

async fn seed_posts(
    nodes: &MemoryNodeRepository,
    categories: &MemoryCategoryRepository,
    count: usize,
) -> Vec<i32> {
    let cat = CreateCategory { categories }
        .execute(new_category("Tech", "tech"))
        .await
        .unwrap();
    let mut ids = Vec::new();
    for i in 0..count {
        let node = CreateNode { nodes, categories }
            .execute(new_node(cat.id, &format!("Post {i}"), &format!("post-{i}")))
            .await
            .unwrap();
        ids.push(node.id);
    }
    ids
}

#[tokio::test]
async fn favoriting_twice_keeps_one_row() {
    let tracker = MemoryTrackerRepository::new();
    let uc = AddFavorite { tracker: &tracker };

    let first = uc.execute(7, USER).await.unwrap();
    let second = uc.execute(7, USER).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(tracker.favorite_count(), 1);
}

#[tokio::test]
async fn remove_favorite_reports_whether_it_existed() {
    let tracker = MemoryTrackerRepository::new();
    AddFavorite { tracker: &tracker }.execute(7, USER).await.unwrap();

    let uc = RemoveFavorite { tracker: &tracker };
    assert!(uc.execute(7, USER).await.unwrap());
    assert!(!uc.execute(7, USER).await.unwrap());
}

#[tokio::test]
async fn repeat_access_refreshes_instead_of_duplicating() {
    let tracker = MemoryTrackerRepository::new();
    let uc = TrackAccess { tracker: &tracker };

    let first = uc.execute(5, USER).await.unwrap();
    let second = uc.execute(5, USER).await.unwrap();
    assert_eq!(first.id, second.id);
    assert!(second.accessed_at >= first.accessed_at);
    assert_eq!(tracker.recent_count(), 1);
}

#[tokio::test]
async fn recency_list_is_trimmed_to_the_keep_bound() {
    let nodes = MemoryNodeRepository::new();
    let categories = MemoryCategoryRepository::new();
    let tracker = MemoryTrackerRepository::new();
    let ids = seed_posts(&nodes, &categories, RECENT_KEEP + 1).await;

    let uc = TrackAccess { tracker: &tracker };
    for id in &ids {
        uc.execute(*id, USER).await.unwrap();
    }
    assert_eq!(tracker.recent_count(), RECENT_KEEP);

    let recent = ListRecent {
        tracker: &tracker,
        nodes: &nodes,
    }
    .execute(USER)
    .await
    .unwrap();
    assert_eq!(recent.len(), RECENT_KEEP);
    // Most recent first; the very first access fell off the end.
    assert_eq!(recent[0].id, *ids.last().unwrap());
    assert!(!recent.iter().any(|n| n.id == ids[0]));
}

#[tokio::test]
async fn hydrated_lists_skip_posts_that_no_longer_exist() {
    let nodes = MemoryNodeRepository::new();
    let categories = MemoryCategoryRepository::new();
    let tracker = MemoryTrackerRepository::new();
    let ids = seed_posts(&nodes, &categories, 2).await;

    AddFavorite { tracker: &tracker }.execute(ids[0], USER).await.unwrap();
    // A favorite pointing at a post id that was never created.
    AddFavorite { tracker: &tracker }.execute(9999, USER).await.unwrap();
    TrackAccess { tracker: &tracker }.execute(ids[1], USER).await.unwrap();
    TrackAccess { tracker: &tracker }.execute(9999, USER).await.unwrap();

    let favorites = ListFavorites {
        tracker: &tracker,
        nodes: &nodes,
    }
    .execute(USER)
    .await
    .unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, ids[0]);

    let recent = ListRecent {
        tracker: &tracker,
        nodes: &nodes,
    }
    .execute(USER)
    .await
    .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, ids[1]);
}
