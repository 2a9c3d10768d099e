use super::*;

// =============================================================
// Envelope / ListData
// =============================================================

#[test]
fn envelope_unwraps_column_list() {
    let json = serde_json::json!({
        "code": 0,
        "msg": "请求成功",
        "data": {
            "count": 2,
            "pageSize": 6,
            "currentPage": 1,
            "list": [
                {
                    "_id": "c1",
                    "title": "Rust",
                    "description": "systems",
                    "avatar": { "_id": "i1", "url": "http://img/1.png" }
                },
                { "_id": "c2", "title": "Vue", "description": "frontend" }
            ]
        }
    });

    let env: Envelope<ListData<ColumnRecord>> = serde_json::from_value(json).unwrap();
    assert_eq!(env.code, 0);
    assert_eq!(env.data.list.len(), 2);
    assert_eq!(env.data.list[0].id, "c1");
    assert_eq!(env.data.list[0].avatar.as_ref().and_then(|a| a.url.as_deref()), Some("http://img/1.png"));
    assert!(env.data.list[1].avatar.is_none());
}

#[test]
fn envelope_without_code_or_msg_defaults() {
    let json = serde_json::json!({ "data": { "token": "abc" } });
    let env: Envelope<LoginResponse> = serde_json::from_value(json).unwrap();
    assert_eq!(env.code, 0);
    assert!(env.msg.is_none());
    assert_eq!(env.data.token, "abc");
}

// =============================================================
// Records
// =============================================================

#[test]
fn post_record_maps_wire_names() {
    let json = serde_json::json!({
        "_id": "p1",
        "title": "Hello",
        "excerpt": "first post",
        "createdAt": "2020-06-11 10:34:22",
        "column": "c1",
        "author": "u1"
    });
    let post: PostRecord = serde_json::from_value(json).unwrap();
    assert_eq!(post.id, "p1");
    assert_eq!(post.column_id, "c1");
    assert_eq!(post.created_at, "2020-06-11 10:34:22");
    assert_eq!(post.excerpt.as_deref(), Some("first post"));
    assert!(post.content.is_none());
    assert!(post.image.is_none());
}

#[test]
fn post_record_serializes_back_to_wire_names() {
    let post = PostRecord {
        id: "p9".to_owned(),
        title: "Draft".to_owned(),
        excerpt: None,
        content: Some("body".to_owned()),
        image: None,
        created_at: "2021-01-01".to_owned(),
        column_id: "c3".to_owned(),
    };
    let value = serde_json::to_value(&post).unwrap();
    assert_eq!(value["_id"], "p9");
    assert_eq!(value["column"], "c3");
    assert_eq!(value["createdAt"], "2021-01-01");
    assert!(value.get("excerpt").is_none());
}

#[test]
fn user_record_maps_wire_names() {
    let json = serde_json::json!({
        "_id": "u1",
        "nickName": "viking",
        "email": "viking@example.com",
        "column": "c1",
        "createdAt": "2020-01-01"
    });
    let user: UserRecord = serde_json::from_value(json).unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.nickname, "viking");
    assert_eq!(user.column_id.as_deref(), Some("c1"));
}

#[test]
fn user_record_tolerates_missing_optional_fields() {
    let user: UserRecord = serde_json::from_value(serde_json::json!({ "_id": "u2" })).unwrap();
    assert!(user.nickname.is_empty());
    assert!(user.email.is_empty());
    assert!(user.column_id.is_none());
}

#[test]
fn column_record_requires_id() {
    let result = serde_json::from_value::<ColumnRecord>(serde_json::json!({ "title": "no id" }));
    assert!(result.is_err());
}

#[test]
fn login_request_debug_hides_password() {
    let req = LoginRequest { email: "a@b.c".to_owned(), password: "hunter2".to_owned() };
    let rendered = format!("{req:?}");
    assert!(rendered.contains("a@b.c"));
    assert!(!rendered.contains("hunter2"));
}
