use super::*;

fn embedded(command: &[&str]) -> Args {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let argv = ["desktop", "--embedded"].into_iter().chain(command.iter().copied());
    Args::try_parse_from(argv).expect("args")
}

#[test]
fn update_collects_only_given_fields() {
    let args = Args::try_parse_from(["desktop", "--embedded", "update", "3", "--role", "Director"])
        .expect("args");
    assert_eq!(
        args.command,
        Command::Update {
            id: "3".into(),
            name: None,
            email: None,
            role: Some("Director".into()),
        }
    );
}

#[test]
fn add_requires_every_field() {
    assert!(Args::try_parse_from(["desktop", "--embedded", "add", "--name", "Amy"]).is_err());
}

#[test]
fn validation_report_lists_one_line_per_field() {
    let errors = validate_draft(&EmployeeDraft::new("", "amy", "")).expect_err("invalid");
    assert_eq!(
        validation_report(&errors),
        "Name: Name is required\nEmail: Invalid email\nRole: Role is required\n"
    );
}

#[tokio::test]
async fn blank_server_url_without_embedded_is_rejected() {
    let args = Args::try_parse_from(["desktop", "--server-url", "  ", "list"]).expect("args");
    assert!(resolve_server(&args).await.is_err());
}

#[tokio::test]
async fn list_against_embedded_server_succeeds() {
    assert_eq!(run(embedded(&["list", "--search", "qa"])).await.expect("run"), 0);
}

#[tokio::test]
async fn add_with_valid_fields_succeeds() {
    let args = embedded(&["add", "--name", "Amy", "--email", "amy@x.com", "--role", "QA"]);
    assert_eq!(run(args).await.expect("run"), 0);
}

#[tokio::test]
async fn add_with_invalid_email_is_rejected_before_sending() {
    let args = embedded(&["add", "--name", "Amy", "--email", "amy", "--role", "QA"]);
    assert_eq!(run(args).await.expect("run"), EXIT_INVALID_INPUT);
}

#[tokio::test]
async fn empty_update_is_rejected() {
    assert_eq!(
        run(embedded(&["update", "1"])).await.expect("run"),
        EXIT_INVALID_INPUT
    );
}

#[tokio::test]
async fn deleting_unknown_id_fails() {
    assert_eq!(
        run(embedded(&["delete", "999"])).await.expect("run"),
        EXIT_FAILURE
    );
}

#[test]
fn arguments_are_trimmed_like_the_form() {
    assert_eq!(
        draft_from_args(" Amy ", " amy@x.com ", "QA\t"),
        EmployeeDraft::new("Amy", "amy@x.com", "QA")
    );
    let patch = patch_from_args(None, Some(" j@x.com ".into()), None);
    assert_eq!(patch.email.as_deref(), Some("j@x.com"));
    assert_eq!(patch.name, None);
}

#[tokio::test]
async fn whitespace_only_name_update_is_rejected() {
    assert_eq!(
        run(embedded(&["update", "1", "--name", "   "])).await.expect("run"),
        EXIT_INVALID_INPUT
    );
}

#[tokio::test]
async fn deleting_id_with_query_syntax_fails_without_touching_records() {
    assert_eq!(
        run(embedded(&["delete", "5?x"])).await.expect("run"),
        EXIT_FAILURE
    );
}
