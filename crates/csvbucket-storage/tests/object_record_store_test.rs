//! Integration tests for ObjectRecordStore
//!
//! Runs the adapter against an in-memory object store, including payloads
//! that were edited outside the service.

use std::sync::Arc;

use bytes::Bytes;
use csvbucket_core::{Document, Record, Row};
use csvbucket_storage::{Error, FetchOutcome, ObjectRecordStore, RecordStore};
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::ObjectStore;

const KEY: &str = "datos.csv";

fn setup() -> (Arc<InMemory>, ObjectRecordStore) {
    let backend = Arc::new(InMemory::new());
    let store = ObjectRecordStore::new(backend.clone(), KEY).unwrap();
    (backend, store)
}

async fn put_raw(backend: &InMemory, payload: &'static [u8]) {
    backend
        .put(&Path::from(KEY), Bytes::from_static(payload))
        .await
        .unwrap();
}

async fn read_raw(backend: &InMemory) -> String {
    let bytes = backend
        .get(&Path::from(KEY))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_store_then_fetch() {
    let (_, store) = setup();

    let mut doc = Document::new();
    doc.append(&Record::new("Ana", 30, 1.65).unwrap());
    doc.append(&Record::new("Luis", 40, 1.8).unwrap());
    store.store(&doc).await.unwrap();

    match store.fetch().await.unwrap() {
        FetchOutcome::Found(fetched) => assert_eq!(fetched, doc),
        FetchOutcome::NotFound => panic!("document should exist after store"),
    }
}

#[tokio::test]
async fn test_sequential_appends_keep_order() {
    let (backend, store) = setup();

    for i in 0..10 {
        let mut doc = store.fetch().await.unwrap().into_document();
        let rows = doc.append(&Record::new(format!("persona-{}", i), 20 + i, 1.7).unwrap());
        assert_eq!(rows, (i + 1) as usize);
        store.store(&doc).await.unwrap();
    }

    let doc = store.fetch().await.unwrap().into_document();
    assert_eq!(doc.len(), 10);
    for (i, row) in doc.rows().iter().enumerate() {
        assert_eq!(row.nombre, format!("persona-{}", i));
    }

    let raw = read_raw(&backend).await;
    assert!(raw.starts_with("nombre,edad,altura\r\n"));
    assert_eq!(raw.lines().count(), 11);
}

#[tokio::test]
async fn test_fetch_externally_edited_document() {
    let (backend, store) = setup();
    put_raw(
        &backend,
        b"nombre,edad,altura\n\nAna,30,1.65\nnot,a,valid,row\n\n\"Diaz, Eva\",22,1.6\n",
    )
    .await;

    let doc = store.fetch().await.unwrap().into_document();
    assert_eq!(
        doc.rows(),
        &[
            Row::new("Ana", "30", "1.65"),
            Row::new("Diaz, Eva", "22", "1.6"),
        ]
    );
}

#[tokio::test]
async fn test_append_normalizes_edited_document() {
    let (backend, store) = setup();
    put_raw(&backend, b"nombre,edad,altura\nAna,30,1.65\n\njunk\n").await;

    let mut doc = store.fetch().await.unwrap().into_document();
    doc.append(&Record::new("Luis", 40, 1.8).unwrap());
    store.store(&doc).await.unwrap();

    assert_eq!(
        read_raw(&backend).await,
        "nombre,edad,altura\r\nAna,30,1.65\r\nLuis,40,1.8\r\n"
    );
}

#[tokio::test]
async fn test_header_only_payload() {
    let (backend, store) = setup();
    put_raw(&backend, b"nombre,edad,altura\r\n").await;

    match store.fetch().await.unwrap() {
        FetchOutcome::Found(doc) => assert!(doc.is_empty()),
        FetchOutcome::NotFound => panic!("header-only document should exist"),
    }
}

#[tokio::test]
async fn test_non_utf8_payload_is_read_error() {
    let (backend, store) = setup();
    put_raw(&backend, b"nombre,edad,altura\n\xff\xfe,1,2\n").await;

    let err = store.fetch().await.unwrap_err();
    assert!(matches!(err, Error::Encoding { .. }));
}

#[tokio::test]
async fn test_fetch_strips_byte_order_mark() {
    let (backend, store) = setup();
    put_raw(&backend, "\u{feff}nombre,edad,altura\r\nAna,30,1.65\r\n".as_bytes()).await;

    let doc = store.fetch().await.unwrap().into_document();
    assert_eq!(doc.rows(), &[Row::new("Ana", "30", "1.65")]);
}

#[tokio::test]
async fn test_probe_existing_document() {
    let (backend, store) = setup();
    put_raw(&backend, b"nombre,edad,altura\r\n").await;
    store.probe().await.unwrap();
}
