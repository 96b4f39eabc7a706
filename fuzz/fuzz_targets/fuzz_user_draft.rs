//! Fuzz target: decoding request bodies as `UserDraft`.
//!
//! Arbitrary bytes must either decode or produce a `Decode` error; a
//! decoded draft must always be storable.

#![no_main]

use libfuzzer_sys::fuzz_target;
use userdir_core::{CoreError, IdAssignment, UserDraft, UserStore};

fuzz_target!(|data: &[u8]| {
    match UserDraft::from_json(data) {
        Ok(draft) => {
            let store = UserStore::seeded(IdAssignment::Length);
            let user = store.create(draft);
            assert_eq!(user.id.value(), 3);
        }
        Err(CoreError::Decode(_)) => {}
        Err(other) => panic!("unexpected error kind: {other:?}"),
    }
});
