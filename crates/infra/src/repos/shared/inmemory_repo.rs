use kurator_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

/// Updates every matching item in place while holding the lock, so the whole
/// update is atomic. Returns the matched items after the update together with
/// the number of items `update` reported as changed.
pub fn update_many<T: Clone, F: Fn(&T) -> bool, U: Fn(&mut T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> (Vec<T>, u64) {
    let mut collection = collection.lock().unwrap();
    let mut updated = Vec::new();
    let mut changed = 0;

    for item in collection.iter_mut() {
        if compare(item) {
            if update(item) {
                changed += 1;
            }
            updated.push(item.clone());
        }
    }

    (updated, changed)
}
