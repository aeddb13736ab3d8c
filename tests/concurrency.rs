mod common;

use std::sync::Arc;
use std::thread;

use common::{build, dictionary};
use lexicon_reader::{LexiconError, RawLdBackend};

#[test]
fn concurrent_lookups_share_one_backend() {
    let fixture = build(4, &dictionary());
    let backend = Arc::new(RawLdBackend::new(fixture.descriptor("Easton"), 4).unwrap());

    let expected = [
        ("aaron", "The eldest son of Amram and Jochebed."),
        ("abram", "Father of a multitude."),
        ("bethel", "House of God."),
        ("module info", "Easton's Bible Dictionary"),
        ("zion", "A hill of Jerusalem."),
    ];

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let backend = Arc::clone(&backend);
            thread::spawn(move || {
                for round in 0..50 {
                    let (key, text) = expected[(t + round) % expected.len()];
                    assert_eq!(backend.get_raw_content(key).unwrap(), text);
                    assert!(matches!(
                        backend.get_raw_content("ZZZNOTPRESENT"),
                        Err(LexiconError::KeyNotFound(_))
                    ));
                    assert_eq!(backend.cardinality().unwrap(), 9);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("lookup thread panicked");
    }
}

#[test]
fn backend_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RawLdBackend>();
}
