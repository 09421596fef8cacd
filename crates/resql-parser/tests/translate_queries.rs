use resql_parser::{translate, ErrorKind, ParsedQuery, ResqlError};

fn selection(query: &str) -> Option<String> {
    translate(query, None).expect("query should translate").selection
}

fn sort(query: &str) -> Option<String> {
    translate(query, None).expect("query should translate").sort
}

fn rejection(query: &str) -> String {
    let err = translate(query, None).expect_err("query should be rejected");
    assert_eq!(err.kind(), ErrorKind::Validation);
    err.to_string()
}

#[test]
fn test_star_projection() {
    let parsed = translate(
        "
           SELECT *
           FROM table
        ",
        None,
    )
    .unwrap();
    assert_eq!(parsed.projection, None);
    assert_eq!(parsed.locator, "table");
}

#[test]
fn test_column_projection() {
    let parsed = translate(
        "
           SELECT column1, column2
           FROM table
        ",
        None,
    )
    .unwrap();
    assert_eq!(
        parsed.projection,
        Some(vec!["column1".to_owned(), "column2".to_owned()])
    );
}

#[test]
fn test_where_only() {
    assert_eq!(
        selection("SELECT *\nFROM table\nWHERE is_podcast = 0").as_deref(),
        Some("is_podcast = 0")
    );
    assert_eq!(
        selection("  SELECT * FROM table WHERE is_podcast = 0  ").as_deref(),
        Some("is_podcast = 0")
    );
    assert_eq!(
        selection("SELECT * FROM table\n\tWHERE is_podcast = 0\n\tORDER BY artist").as_deref(),
        Some("is_podcast = 0")
    );
    assert_eq!(
        selection("SELECT * FROM table WHERE is_podcast = 0 AND is_music = 1 ORDER BY artist")
            .as_deref(),
        Some("is_podcast = 0 AND is_music = 1")
    );
}

#[test]
fn test_where_group_by() {
    assert_eq!(
        selection("SELECT * FROM table WHERE is_podcast = 0 GROUP BY artist_id").as_deref(),
        Some("is_podcast = 0) GROUP BY (artist_id")
    );
    assert_eq!(
        selection("SELECT * FROM table WHERE is_podcast = 0 GROUP BY artist_id, album_id")
            .as_deref(),
        Some("is_podcast = 0) GROUP BY artist_id, (album_id")
    );
    assert_eq!(
        selection("SELECT *\nFROM table\nWHERE is_podcast = 0\nGROUP BY artist_id\nORDER BY artist")
            .as_deref(),
        Some("is_podcast = 0) GROUP BY (artist_id")
    );
    assert_eq!(
        selection(
            "SELECT * FROM table WHERE is_podcast = 0 GROUP BY artist_id, album_id ORDER BY artist"
        )
        .as_deref(),
        Some("is_podcast = 0) GROUP BY artist_id, (album_id")
    );
}

#[test]
fn test_where_group_by_having() {
    assert_eq!(
        selection("SELECT * FROM table WHERE is_podcast = 0 GROUP BY artist_id HAVING songs > 0")
            .as_deref(),
        Some("is_podcast = 0) GROUP BY artist_id HAVING (songs > 0")
    );
    assert_eq!(
        selection(
            "SELECT * FROM table WHERE is_podcast = 0 GROUP BY artist_id HAVING songs > 0 AND albums > 0"
        )
        .as_deref(),
        Some("is_podcast = 0) GROUP BY artist_id HAVING (songs > 0 AND albums > 0")
    );
    assert_eq!(
        selection(
            "SELECT *
             FROM table
             WHERE is_podcast = 0
             GROUP BY artist_id, album_id
             HAVING songs > 0 AND albums > 0
             ORDER BY album"
        )
        .as_deref(),
        Some("is_podcast = 0) GROUP BY artist_id, album_id HAVING (songs > 0 AND albums > 0")
    );
}

#[test]
fn test_order_by() {
    assert_eq!(
        sort("SELECT *\nFROM table\nWHERE condition\nORDER BY artist").as_deref(),
        Some("artist")
    );
    assert_eq!(
        sort("SELECT * FROM table WHERE condition ORDER BY artist, album").as_deref(),
        Some("artist, album")
    );
    assert_eq!(sort("SELECT * FROM table"), None);
}

#[test]
fn test_limit_offset_kept_in_sort() {
    assert_eq!(
        sort("SELECT * FROM table WHERE condition ORDER BY artist LIMIT 10 OFFSET 10").as_deref(),
        Some("artist LIMIT 10 OFFSET 10")
    );
    assert_eq!(
        sort("SELECT *\nFROM table\nORDER BY artist\nLIMIT 10\nOFFSET 10").as_deref(),
        Some("artist LIMIT 10 OFFSET 10")
    );
}

#[test]
fn test_full_query() {
    let query = "
        SELECT
         distinct artist_id,
         artist,
         count(*) as songs,
         count(distinct album_id) as albums
        FROM content://media/external/audio/media
        WHERE is_podcast = 0
        GROUP BY artist_id
        HAVING songs >= 5 AND albums >= 2
        ORDER BY artist_key DESC
        LIMIT 10
        OFFSET 2
    ";
    let parsed = translate(query, None).unwrap();
    assert_eq!(
        parsed,
        ParsedQuery {
            locator: "content://media/external/audio/media".to_owned(),
            projection: Some(vec![
                "distinct artist_id".to_owned(),
                "artist".to_owned(),
                "count(*) as songs".to_owned(),
                "count(distinct album_id) as albums".to_owned(),
            ]),
            selection: Some(
                "is_podcast = 0) GROUP BY artist_id HAVING (songs >= 5 AND albums >= 2".to_owned()
            ),
            selection_args: None,
            sort: Some(
                "artist_key DESC         LIMIT 10         OFFSET 2".to_owned()
            ),
        }
    );
}

#[test]
fn test_outputs_never_contain_tabs_or_newlines() {
    let parsed = translate(
        "SELECT\ta,\n\tb\nFROM\tt\nWHERE\tx = 1\nORDER BY\ta",
        Some(vec!["kept\tas is".to_owned()]),
    )
    .unwrap();
    assert_eq!(parsed.projection, Some(vec!["a".to_owned(), "b".to_owned()]));
    assert_eq!(parsed.locator, "t");
    assert_eq!(parsed.selection.as_deref(), Some("x = 1"));
    assert_eq!(parsed.sort.as_deref(), Some("a"));
    assert_eq!(parsed.selection_args, Some(vec!["kept\tas is".to_owned()]));
}

#[test]
fn test_missing_clauses() {
    assert_eq!(rejection("FROM t"), "missing SELECT clause");
    assert_eq!(rejection("SELECT a"), "missing FROM clause");
    assert_eq!(rejection(""), "missing SELECT clause");
}

#[test]
fn test_dependency_rejections() {
    assert_eq!(
        rejection("SELECT * FROM t GROUP BY a"),
        "WHERE clause is mandatory when using GROUP BY"
    );
    assert_eq!(
        rejection("SELECT * FROM t WHERE x HAVING a > 1"),
        "GROUP BY clause is mandatory when using HAVING"
    );
    assert_eq!(
        rejection("SELECT * FROM t LIMIT 1"),
        "ORDER BY clause is mandatory when using LIMIT"
    );
    assert_eq!(
        rejection("SELECT * FROM t ORDER BY a OFFSET 1"),
        "LIMIT clause is mandatory when using OFFSET"
    );
}

#[test]
fn test_first_match_ambiguity_is_kept() {
    // "fromage" contains "from": the locator takes it as the FROM keyword.
    let parsed = translate("SELECT fromage FROM cheeses", None).unwrap();
    assert_eq!(parsed.projection, Some(vec![String::new()]));
    assert_eq!(parsed.locator, "age FROM cheeses");
}

#[test]
fn test_internal_error_not_recoverable() {
    let err = translate("FROM t SELECT a", None).unwrap_err();
    assert!(matches!(err, ResqlError::Internal(_)));
    assert!(!err.is_user_recoverable());
}
