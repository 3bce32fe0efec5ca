use std::cell::RefCell;
use std::rc::Rc;
use teamfeed_core::{
    open_db_in_memory, CommentError, NotificationDispatchRequest, NotificationId,
    NotificationRecord, NotificationRepository, Post, PostDraft, PostId, PostRepository,
    PublishError, PublishService, RepoError, RepoResult, SqliteNotificationRepository,
    SqlitePostRepository,
};
use uuid::Uuid;

fn mention(id: &str) -> String {
    format!(r#"<span class="mention" data-denotation-char="@" data-id="{id}">@{id}</span>"#)
}

struct UnavailablePosts;

impl PostRepository for UnavailablePosts {
    fn create_post(&self, _draft: &PostDraft) -> RepoResult<PostId> {
        Err(RepoError::InvalidData("storage offline".to_string()))
    }

    fn add_comment(&self, _user_id: &str, _post_id: PostId, _text: &str) -> RepoResult<()> {
        Err(RepoError::InvalidData("storage offline".to_string()))
    }

    fn get_post(&self, _post_id: PostId) -> RepoResult<Option<Post>> {
        Ok(None)
    }

    fn list_posts(&self) -> RepoResult<Vec<Post>> {
        Ok(Vec::new())
    }
}

#[derive(Clone, Default)]
struct RecordingNotifications {
    sent: Rc<RefCell<Vec<NotificationDispatchRequest>>>,
}

impl NotificationRepository for RecordingNotifications {
    fn dispatch(&self, request: &NotificationDispatchRequest) -> RepoResult<NotificationId> {
        self.sent.borrow_mut().push(request.clone());
        Ok(Uuid::new_v4())
    }

    fn mark_read(&self, _user_id: &str, _notification_id: NotificationId) -> RepoResult<()> {
        Ok(())
    }

    fn list_for_recipient(&self, _user_id: &str) -> RepoResult<Vec<NotificationRecord>> {
        Ok(Vec::new())
    }
}

#[test]
fn publish_persists_post_and_notifies_each_mentioned_user_once() {
    let conn = open_db_in_memory().unwrap();
    let service = PublishService::new(
        SqlitePostRepository::try_new(&conn).unwrap(),
        SqliteNotificationRepository::try_new(&conn).unwrap(),
    );
    let body = format!(
        "<p>{} {} {} {}</p>",
        mention("u2"),
        mention("u1"),
        mention("u3"),
        mention("u2")
    );
    let draft = PostDraft::new("u1", "Kickoff", body).with_tags(["Ideation", " Research "]);

    let report = service.publish(&draft).unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.delivered(), 2);
    assert_eq!(report.failed().count(), 0);

    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let stored = posts.get_post(report.post_id).unwrap().expect("post stored");
    assert_eq!(stored.title, "Kickoff");
    assert_eq!(stored.author, "u1");
    assert_eq!(stored.tags, vec!["Ideation", "Research"]);
    assert_eq!(stored.num_comments, 0);
    assert!(stored.time > 0);

    let notifications = SqliteNotificationRepository::try_new(&conn).unwrap();
    for recipient in ["u2", "u3"] {
        let inbox = notifications.list_for_recipient(recipient).unwrap();
        assert_eq!(inbox.len(), 1, "recipient {recipient}");
        assert_eq!(inbox[0].sender_id, "u1");
        assert_eq!(inbox[0].post_id, report.post_id);
        assert_eq!(inbox[0].content, "click to check the post");
        assert!(!inbox[0].is_read);
    }
    assert!(notifications.list_for_recipient("u1").unwrap().is_empty());
}

#[test]
fn failed_create_post_dispatches_nothing() {
    let notifications = RecordingNotifications::default();
    let service = PublishService::new(UnavailablePosts, notifications.clone());
    let draft = PostDraft::new("u1", "t", mention("u2"));

    let err = service.publish(&draft).unwrap_err();

    assert!(matches!(err, PublishError::Persistence(_)));
    assert!(notifications.sent.borrow().is_empty());
}

#[test]
fn invalid_draft_is_rejected_before_persistence() {
    let notifications = RecordingNotifications::default();
    let service = PublishService::new(UnavailablePosts, notifications.clone());

    let err = service
        .publish(&PostDraft::new("  ", "t", mention("u2")))
        .unwrap_err();

    assert!(matches!(err, PublishError::Validation(_)));
    assert!(notifications.sent.borrow().is_empty());
}

#[test]
fn preview_text_override_is_used_for_dispatch() {
    let conn = open_db_in_memory().unwrap();
    let notifications = RecordingNotifications::default();
    let service = PublishService::new(SqlitePostRepository::try_new(&conn).unwrap(), notifications.clone())
        .with_preview_text("new post for you");

    service
        .publish(&PostDraft::new("u1", "t", mention("u2")))
        .unwrap();

    let sent = notifications.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message_body, "new post for you");
}

#[test]
fn comments_bump_the_counter_and_require_an_existing_post() {
    let conn = open_db_in_memory().unwrap();
    let service = PublishService::new(
        SqlitePostRepository::try_new(&conn).unwrap(),
        SqliteNotificationRepository::try_new(&conn).unwrap(),
    );
    let post_id = service
        .publish(&PostDraft::new("u1", "t", "<p>hello</p>"))
        .unwrap()
        .post_id;

    service.add_comment("u2", post_id, "looks good").unwrap();
    service.add_comment("u3", post_id, "+1").unwrap();

    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    assert_eq!(posts.get_post(post_id).unwrap().unwrap().num_comments, 2);

    assert!(matches!(
        service.add_comment("u2", post_id, "   "),
        Err(CommentError::BlankComment)
    ));
    let missing = Uuid::new_v4();
    match service.add_comment("u2", missing, "hello?") {
        Err(CommentError::PostNotFound(id)) => assert_eq!(id, missing),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(posts.get_post(post_id).unwrap().unwrap().num_comments, 2);
}

#[test]
fn list_posts_is_newest_first_for_rapid_writes() {
    let conn = open_db_in_memory().unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let created: Vec<PostId> = (0..20)
        .map(|idx| {
            posts
                .create_post(&PostDraft::new("u1", format!("post {idx}"), ""))
                .unwrap()
        })
        .collect();

    let listed = posts.list_posts().unwrap();

    let listed_ids: Vec<PostId> = listed.iter().map(|post| post.id).collect();
    let expected: Vec<PostId> = created.iter().rev().copied().collect();
    assert_eq!(listed_ids, expected);
    assert!(listed.windows(2).all(|pair| pair[0].time >= pair[1].time));
}

#[test]
fn post_time_is_epoch_milliseconds() {
    let conn = open_db_in_memory().unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let before = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64;

    let id = posts.create_post(&PostDraft::new("u1", "t", "")).unwrap();

    let time = posts.get_post(id).unwrap().unwrap().time;
    assert!((time - before).abs() < 60_000, "time={time} before={before}");
}
