/// Integration tests for the gallery models and the approval workflow
///
/// Requires PostgreSQL at DATABASE_URL; skipped otherwise. Every test
/// creates its own users with random names, so tests can share a database.

mod common;

use chrono::NaiveDate;
use common::{create_artist, create_user, profile, unique};
use opengallery_shared::models::artist::Artist;
use opengallery_shared::models::artist_application::{
    ApplicationAction, ApplicationError, ApplicationStatus, ArtistApplication,
};
use opengallery_shared::models::artwork::{Artwork, NewArtwork};
use opengallery_shared::models::exhibition::{
    Exhibition, ExhibitionArtwork, ExhibitionError, NewExhibition,
};
use opengallery_shared::models::report::ArtistStatistics;
use opengallery_shared::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

fn artwork(title: &str, price: i64, size_number: i32) -> NewArtwork {
    NewArtwork {
        title: title.to_string(),
        price,
        size_number,
    }
}

fn spring_show(title: &str) -> NewExhibition {
    NewExhibition {
        title: title.to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    }
}

async fn application_count(pool: &PgPool, user_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM artist_applications WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_approve_creates_artist_from_application() {
    let Some(pool) = common::test_pool().await else { return };

    let user = create_user(&pool, false).await;
    let application = ArtistApplication::submit(&pool, &user, &profile("김작가"))
        .await
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert!(application.processed_at.is_none());

    let processed =
        ArtistApplication::process_batch(&pool, ApplicationAction::Approve, &[application.id])
            .await
            .unwrap();
    assert_eq!(processed, 1);

    let artist = Artist::find_by_user(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(artist.name, "김작가");
    assert_eq!(artist.user_id, user.id);
    assert_eq!(artist.profile(), application.profile());

    let reloaded = ArtistApplication::find_by_id(&pool, application.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, ApplicationStatus::Approved);
    assert!(reloaded.processed_at.is_some());

    User::delete(&pool, user.id).await.unwrap();
}

#[tokio::test]
async fn test_processed_applications_are_skipped() {
    let Some(pool) = common::test_pool().await else { return };

    let user = create_user(&pool, false).await;
    let application = ArtistApplication::submit(&pool, &user, &profile("재처리"))
        .await
        .unwrap();

    let ids = [application.id, Uuid::new_v4()];
    assert_eq!(
        ArtistApplication::process_batch(&pool, ApplicationAction::Approve, &ids)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        ArtistApplication::process_batch(&pool, ApplicationAction::Reject, &ids)
            .await
            .unwrap(),
        0
    );

    let reloaded = ArtistApplication::find_by_id(&pool, application.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, ApplicationStatus::Approved);

    User::delete(&pool, user.id).await.unwrap();
}

#[tokio::test]
async fn test_reject_creates_no_artist() {
    let Some(pool) = common::test_pool().await else { return };

    let user = create_user(&pool, false).await;
    let application = ArtistApplication::submit(&pool, &user, &profile("거절"))
        .await
        .unwrap();

    let processed =
        ArtistApplication::process_batch(&pool, ApplicationAction::Reject, &[application.id])
            .await
            .unwrap();
    assert_eq!(processed, 1);

    assert!(Artist::find_by_user(&pool, user.id).await.unwrap().is_none());
    let reloaded = ArtistApplication::find_by_id(&pool, application.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, ApplicationStatus::Rejected);
    assert!(reloaded.processed_at.is_some());

    // A rejected applicant may apply again
    assert!(ArtistApplication::submit(&pool, &user, &profile("재신청"))
        .await
        .is_ok());

    User::delete(&pool, user.id).await.unwrap();
}

#[tokio::test]
async fn test_second_pending_application_is_refused() {
    let Some(pool) = common::test_pool().await else { return };

    let user = create_user(&pool, false).await;
    ArtistApplication::submit(&pool, &user, &profile("첫신청"))
        .await
        .unwrap();

    let second = ArtistApplication::submit(&pool, &user, &profile("두번째")).await;
    assert!(matches!(second, Err(ApplicationError::AlreadyPending)));
    assert_eq!(application_count(&pool, user.id).await, 1);

    User::delete(&pool, user.id).await.unwrap();
}

#[tokio::test]
async fn test_artists_and_staff_cannot_apply() {
    let Some(pool) = common::test_pool().await else { return };

    let (artist_user, _) = create_artist(&pool, "기존작가").await;
    let result = ArtistApplication::submit(&pool, &artist_user, &profile("기존작가")).await;
    assert!(matches!(result, Err(ApplicationError::AlreadyArtist)));

    let staff = create_user(&pool, true).await;
    let result = ArtistApplication::submit(&pool, &staff, &profile("스태프")).await;
    assert!(matches!(result, Err(ApplicationError::StaffNotAllowed)));

    assert_eq!(application_count(&pool, artist_user.id).await, 0);
    assert_eq!(application_count(&pool, staff.id).await, 0);

    User::delete(&pool, artist_user.id).await.unwrap();
    User::delete(&pool, staff.id).await.unwrap();
}

#[tokio::test]
async fn test_failed_batch_rolls_back_every_transition() {
    let Some(pool) = common::test_pool().await else { return };

    // The first applicant gains a profile behind the workflow's back, so
    // approving their application violates the one-artist-per-user rule.
    let conflicted = create_user(&pool, false).await;
    let first = ArtistApplication::submit(&pool, &conflicted, &profile("충돌"))
        .await
        .unwrap();
    Artist::create(&pool, conflicted.id, &profile("충돌"))
        .await
        .unwrap();

    let clean = create_user(&pool, false).await;
    let second = ArtistApplication::submit(&pool, &clean, &profile("정상"))
        .await
        .unwrap();

    let result = ArtistApplication::process_batch(
        &pool,
        ApplicationAction::Approve,
        &[first.id, second.id],
    )
    .await;
    assert!(result.is_err());

    for id in [first.id, second.id] {
        let application = ArtistApplication::find_by_id(&pool, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(application.status, ApplicationStatus::Pending);
    }
    assert!(Artist::find_by_user(&pool, clean.id).await.unwrap().is_none());

    User::delete(&pool, conflicted.id).await.unwrap();
    User::delete(&pool, clean.id).await.unwrap();
}

#[tokio::test]
async fn test_application_search() {
    let Some(pool) = common::test_pool().await else { return };

    let name = unique("s");
    let user = create_user(&pool, false).await;
    let application = ArtistApplication::submit(&pool, &user, &profile(&name))
        .await
        .unwrap();

    let found = ArtistApplication::list(&pool, Some(name.to_uppercase().as_str()))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, application.id);

    let none = ArtistApplication::list(&pool, Some(unique("missing").as_str()))
        .await
        .unwrap();
    assert!(none.is_empty());

    User::delete(&pool, user.id).await.unwrap();
}

#[tokio::test]
async fn test_artwork_listing_is_newest_first() {
    let Some(pool) = common::test_pool().await else { return };

    let (user, artist) = create_artist(&pool, &unique("o")).await;
    let token = unique("order-");

    let older = Artwork::create(&pool, artist.id, &artwork(&format!("{token} one"), 1000, 10))
        .await
        .unwrap();
    let newer = Artwork::create(&pool, artist.id, &artwork(&format!("{token} two"), 2000, 20))
        .await
        .unwrap();

    let page = Artwork::list(&pool, Some(token.as_str()), None).await.unwrap();
    let ids: Vec<Uuid> = page.items.iter().map(|l| l.artwork.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].artist_name, artist.name);

    let own = Artwork::list_by_artist(&pool, artist.id).await.unwrap();
    assert_eq!(own[0].id, newer.id);

    User::delete(&pool, user.id).await.unwrap();
}

#[tokio::test]
async fn test_artist_search_matches_exactly_one() {
    let Some(pool) = common::test_pool().await else { return };

    let name = unique("find");
    let (user, artist) = create_artist(&pool, &name).await;
    let (other_user, _) = create_artist(&pool, &unique("other")).await;

    let page = Artist::list(&pool, Some(name.as_str()), None).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, artist.id);

    let page = Artist::list(&pool, Some(unique("zz").as_str()), None).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.num_pages, 1);

    let page = Artwork::list(&pool, Some(name.as_str()), None).await.unwrap();
    assert!(page.is_empty());

    User::delete(&pool, user.id).await.unwrap();
    User::delete(&pool, other_user.id).await.unwrap();
}

#[tokio::test]
async fn test_exhibition_links_only_own_artworks() {
    let Some(pool) = common::test_pool().await else { return };

    let (owner_user, owner) = create_artist(&pool, &unique("own")).await;
    let (stranger_user, stranger) = create_artist(&pool, &unique("str")).await;

    let mine = Artwork::create(&pool, owner.id, &artwork("Mine", 500, 10))
        .await
        .unwrap();
    let theirs = Artwork::create(&pool, stranger.id, &artwork("Theirs", 500, 10))
        .await
        .unwrap();

    let spring = spring_show("Spring");
    let exhibition = Exhibition::create_with_artworks(&pool, owner.id, &spring, &[mine.id, mine.id])
        .await
        .unwrap();
    assert_eq!(ExhibitionArtwork::count_for(&pool, exhibition.id).await.unwrap(), 1);

    let link = ExhibitionArtwork::link(&pool, exhibition.id, theirs.id)
        .await
        .unwrap();
    assert!(link.is_none());
    assert_eq!(ExhibitionArtwork::count_for(&pool, exhibition.id).await.unwrap(), 1);

    let result = Exhibition::create_with_artworks(
        &pool,
        owner.id,
        &spring_show("Mixed"),
        &[mine.id, theirs.id],
    )
    .await;
    assert!(matches!(result, Err(ExhibitionError::ArtworkNotFound(id)) if id == theirs.id));

    let exhibitions = Exhibition::list_by_artist(&pool, owner.id).await.unwrap();
    assert_eq!(exhibitions.len(), 1, "failed creation must not leave a row behind");

    let shown = Exhibition::artworks(&pool, exhibition.id).await.unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, mine.id);

    User::delete(&pool, owner_user.id).await.unwrap();
    User::delete(&pool, stranger_user.id).await.unwrap();
}

#[tokio::test]
async fn test_exhibition_requires_artworks_and_ordered_dates() {
    let Some(pool) = common::test_pool().await else { return };

    let (user, artist) = create_artist(&pool, &unique("ex")).await;

    let empty = spring_show("Empty");
    let result = Exhibition::create_with_artworks(&pool, artist.id, &empty, &[]).await;
    assert!(matches!(result, Err(ExhibitionError::NoArtworksSelected)));

    let mut reversed = spring_show("Reversed");
    std::mem::swap(&mut reversed.start_date, &mut reversed.end_date);
    let result =
        Exhibition::create_with_artworks(&pool, artist.id, &reversed, &[Uuid::new_v4()]).await;
    assert!(matches!(result, Err(ExhibitionError::InvalidDateRange)));

    User::delete(&pool, user.id).await.unwrap();
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let Some(pool) = common::test_pool().await else { return };

    let (user, artist) = create_artist(&pool, &unique("del")).await;
    let piece = Artwork::create(&pool, artist.id, &artwork("Doomed", 100, 5))
        .await
        .unwrap();
    let exhibition =
        Exhibition::create_with_artworks(&pool, artist.id, &spring_show("Last"), &[piece.id])
            .await
            .unwrap();

    assert!(User::delete(&pool, user.id).await.unwrap());

    assert!(Artist::find_by_id(&pool, artist.id).await.unwrap().is_none());
    assert!(Artwork::find_by_id(&pool, piece.id).await.unwrap().is_none());
    assert!(Exhibition::find_by_id(&pool, exhibition.id).await.unwrap().is_none());
    assert_eq!(ExhibitionArtwork::count_for(&pool, exhibition.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_artist_statistics() {
    let Some(pool) = common::test_pool().await else { return };

    let (user, artist) = create_artist(&pool, &unique("stat")).await;
    for (price, size) in [(1000, 50), (2000, 100), (3000, 200)] {
        Artwork::create(&pool, artist.id, &artwork("Piece", price, size))
            .await
            .unwrap();
    }
    let (idle_user, idle) = create_artist(&pool, &unique("idle")).await;

    let stats = ArtistStatistics::load(&pool).await.unwrap();

    let row = stats.iter().find(|s| s.artist_id == artist.id).unwrap();
    assert_eq!(row.artwork_count, 3);
    assert_eq!(row.small_artwork_count, 2);
    assert_eq!(row.avg_price, Some(2000.0));
    assert_eq!(row.formatted_avg_price(), "2,000");

    let empty = stats.iter().find(|s| s.artist_id == idle.id).unwrap();
    assert_eq!(empty.artwork_count, 0);
    assert_eq!(empty.small_artwork_count, 0);
    assert_eq!(empty.avg_price, None);

    User::delete(&pool, user.id).await.unwrap();
    User::delete(&pool, idle_user.id).await.unwrap();
}
