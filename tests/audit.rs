use std::{
    io,
    sync::{Arc, Mutex},
};

use ganimart::audit::log_audit;
use serde_json::json;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(emit: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, emit);
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn audit_records_metadata() {
    let line = capture(|| {
        log_audit(
            Some(7),
            "cart_update",
            Some("cart"),
            Some(json!({ "product_id": 1 })),
        )
    });

    assert!(line.contains("audit"));
    assert!(line.contains("action=\"cart_update\""));
    assert!(line.contains("resource=\"cart\""));
    assert!(line.contains("product_id"));
}

#[test]
fn audit_without_metadata_or_resource() {
    let line = capture(|| log_audit(None, "logout", None, None));

    assert!(line.contains("action=\"logout\""));
    assert!(line.contains("resource=\"-\""));
    assert!(line.contains("metadata=null"));
}
