use std::collections::BTreeSet;
use teamfeed_core::{
    open_db_in_memory, FeedService, FilterCriteria, PostDraft, PostRepository,
    SqlitePostRepository, SqliteUserRepository, User, UserRepository,
};

#[test]
fn visible_posts_applies_criteria_against_the_stored_directory() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    users
        .upsert_user(&User::new("u1", "Ada").with_team(5_i64))
        .unwrap();
    users
        .upsert_user(&User::new("u2", "Bea").with_team(7_i64))
        .unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let alpha = posts
        .create_post(&PostDraft::new("u1", "A", "<p>alpha</p>").with_tags(["Ideation"]))
        .unwrap();
    posts
        .create_post(&PostDraft::new("u2", "B", "<p>beta</p>").with_tags(["Ideation"]))
        .unwrap();

    let service = FeedService::new(posts, users);

    assert_eq!(service.visible_posts(&FilterCriteria::new()).unwrap().len(), 2);

    let criteria = FilterCriteria::new()
        .with_query("A")
        .with_tags(["Ideation"])
        .with_teams(["5"]);
    let visible = service.visible_posts(&criteria).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, alpha);
}

#[test]
fn find_people_filters_the_directory() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let mut ada = User::new("u1", "Ada");
    ada.expertise = vec!["Finance".to_string()];
    users.upsert_user(&ada).unwrap();
    users.upsert_user(&User::new("u2", "Bea")).unwrap();
    let service = FeedService::new(SqlitePostRepository::try_new(&conn).unwrap(), users);

    let chips: BTreeSet<String> = ["Finance".to_string()].into();
    let found = service.find_people("", &chips).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].uid, "u1");
    assert_eq!(service.directory().unwrap().len(), 2);
}
