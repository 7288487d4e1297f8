mod support;

use statement_client::Session;
use statement_core::{LABEL_FAILURE_MESSAGE, SubmitError};
use support::{FakeApi, rows, statement_file, txn};

#[tokio::test]
async fn test_submit_without_file_sends_nothing() {
    let mut s = Session::new(FakeApi::default(), "saraswat");
    assert_eq!(s.submit().await, Err(SubmitError::NoFile));
    assert_eq!(s.view().error(), Some("Please select a file"));
    assert_eq!(s.api().upload_count(), 0);
}

#[tokio::test]
async fn test_upload_sends_file_and_bank() {
    let path = statement_file("april.pdf");
    let mut s = Session::new(FakeApi::replying(rows(3)), "saraswat");
    s.select_file(&path).unwrap();
    s.submit().await.unwrap();

    let uploads = s.api().uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name, "april.pdf");
    assert_eq!(uploads[0].bank, "saraswat");
    assert!(uploads[0].bytes.starts_with(b"%PDF"));
    assert!(!s.view().is_loading());
    assert_eq!(s.view().transactions().len(), 3);
}

#[tokio::test]
async fn test_upload_replaces_list_and_resets_page() {
    let path = statement_file("replace.pdf");
    let mut s = Session::new(FakeApi::replying(rows(130)), "saraswat");
    s.select_file(&path).unwrap();
    s.submit().await.unwrap();
    assert_eq!(s.view().total_pages(), 3);
    assert!(s.next_page());
    assert!(s.next_page());
    assert!(!s.next_page());
    assert_eq!(s.view().page(), 3);

    let t1 = txn("01/05/2023", "NEFT", "");
    let t2 = txn("02/05/2023", "ATM", "");
    s.api().reply_with(Ok(vec![t1.clone(), t2.clone()]));
    s.submit().await.unwrap();

    assert_eq!(s.view().transactions().rows(), &[t1, t2]);
    assert_eq!(s.view().page(), 1);
    assert_eq!(s.view().total_pages(), 1);
}

#[tokio::test]
async fn test_server_error_keeps_list() {
    let path = statement_file("error.pdf");
    let mut s = Session::new(FakeApi::replying(rows(2)), "saraswat");
    s.select_file(&path).unwrap();
    s.submit().await.unwrap();

    s.api().reply_with(Err("bad file".to_string()));
    s.submit().await.unwrap();

    assert_eq!(s.view().error(), Some("bad file"));
    assert_eq!(s.view().transactions().len(), 2);
}

#[tokio::test]
async fn test_missing_file_reports_read_error() {
    let mut s = Session::new(FakeApi::replying(rows(2)), "saraswat");
    s.select_file("/nonexistent/dir/statement.pdf").unwrap();
    s.submit().await.unwrap();

    let err = s.view().error().unwrap();
    assert!(err.contains("/nonexistent/dir/statement.pdf"), "{err}");
    assert_eq!(s.api().upload_count(), 0);
    assert!(!s.view().shows_table());
}

#[tokio::test]
async fn test_label_roundtrip() {
    let path = statement_file("labels.pdf");
    let api = FakeApi::replying(vec![
        txn("01/04/2023", "SALARY", "X"),
        txn("02/04/2023", "RENT", ""),
        txn("01/04/2023", "SALARY", "X"),
    ]);
    let mut s = Session::new(api, "saraswat");
    s.select_file(&path).unwrap();
    s.submit().await.unwrap();

    assert!(s.open_row(0));
    assert_eq!(s.view().modal().draft(), "X");
    s.set_draft("Y");
    assert!(s.save_label().await);

    let sent = s.api().label_updates.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].label, "Y");
    assert_eq!(sent[0].transaction_id, serde_json::json!(0));

    let labels: Vec<_> = s
        .view()
        .transactions()
        .rows()
        .iter()
        .map(|t| t.label_text().to_string())
        .collect();
    assert_eq!(labels, ["Y", "-", "X"]);
    assert!(!s.view().modal().is_open());
    assert_eq!(s.view().modal().draft(), "");
}

#[tokio::test]
async fn test_reupload_closes_dialog_for_old_list() {
    let path = statement_file("reupload.pdf");
    let api = FakeApi::replying(vec![
        txn("01/04/2023", "OLD-SALARY", ""),
        txn("02/04/2023", "OLD-RENT", ""),
    ]);
    let mut s = Session::new(api, "saraswat");
    s.select_file(&path).unwrap();
    s.submit().await.unwrap();

    assert!(s.open_row(1));
    s.api().reply_with(Ok(vec![
        txn("03/05/2023", "NEW-ATM", ""),
        txn("04/05/2023", "NEW-FUEL", ""),
    ]));
    s.submit().await.unwrap();

    assert!(!s.view().modal().is_open());
    s.set_draft("rent");
    assert!(!s.save_label().await);
    assert_eq!(s.api().label_count(), 0);
    assert!(s.view().transactions().rows().iter().all(|t| t.label_text() == "-"));
}

#[tokio::test]
async fn test_empty_draft_is_noop() {
    let path = statement_file("noop.pdf");
    let mut s = Session::new(FakeApi::replying(rows(1)), "saraswat");
    s.select_file(&path).unwrap();
    s.submit().await.unwrap();

    assert!(!s.save_label().await);
    s.open_row(0);
    assert!(!s.save_label().await);
    assert_eq!(s.api().label_count(), 0);
    assert!(s.view().modal().is_open());
}

#[tokio::test]
async fn test_cancel_sends_nothing() {
    let path = statement_file("cancel.pdf");
    let mut s = Session::new(FakeApi::replying(rows(2)), "saraswat");
    s.select_file(&path).unwrap();
    s.submit().await.unwrap();
    let before = s.view().transactions().clone();

    s.open_row(1);
    s.set_draft("travel");
    s.cancel_modal();

    assert_eq!(s.api().label_count(), 0);
    assert_eq!(s.view().transactions(), &before);
    assert!(!s.view().modal().is_open());
}

#[tokio::test]
async fn test_label_failure_keeps_list() {
    let path = statement_file("fail.pdf");
    let api = FakeApi {
        label_fails: true,
        ..FakeApi::replying(vec![txn("01/04/2023", "SALARY", "old")])
    };
    let mut s = Session::new(api, "saraswat");
    s.select_file(&path).unwrap();
    s.submit().await.unwrap();

    s.open_row(0);
    s.set_draft("new");
    assert!(s.save_label().await);

    assert_eq!(s.view().error(), Some(LABEL_FAILURE_MESSAGE));
    assert_eq!(s.view().transactions().rows()[0].label.as_deref(), Some("old"));
    assert_eq!(s.view().modal().draft(), "");
}
