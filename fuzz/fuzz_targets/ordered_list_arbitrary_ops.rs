#![no_main]

use libfuzzer_sys::fuzz_target;
use cachequeue::ds::OrderedList;

// Fuzz arbitrary operation sequences on OrderedList
//
// Tests random sequences of reserve, append, push_back, remove, move_to_tail,
// remove_first and clear, including operations through tombstoned handles.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: OrderedList<u32> = OrderedList::new();
    let mut all_ids = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 7;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                // push_back
                let id = list.push_back(value);
                all_ids.push(id);
                assert_eq!(list.back(), Some(&value));
                assert!(list.is_linked(id));
            }
            1 => {
                // reserve
                let old_len = list.len();
                let id = list.reserve(value);
                all_ids.push(id);
                assert!(list.contains(id));
                assert!(!list.is_linked(id));
                assert_eq!(list.len(), old_len);
            }
            2 => {
                // append
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let was_pending = list.contains(id) && !list.is_linked(id);
                    assert_eq!(list.append(id), was_pending);
                    if was_pending {
                        assert_eq!(list.back_id(), Some(id));
                    }
                }
            }
            3 => {
                // remove
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let was_live = list.contains(id);
                    assert_eq!(list.remove(id).is_some(), was_live);
                    assert!(list.is_tombstoned(id));
                    assert!(list.remove(id).is_none());
                }
            }
            4 => {
                // move_to_tail
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let was_linked = list.is_linked(id);
                    let moved = list.move_to_tail(id);
                    assert_eq!(moved, list.contains(id));
                    if was_linked {
                        assert_eq!(list.back_id(), Some(id));
                    }
                }
            }
            5 => {
                // remove_first
                let old_len = list.len();
                let head = list.front_id();
                match list.remove_first() {
                    Some((id, _)) => {
                        assert_eq!(Some(id), head);
                        assert_eq!(list.len(), old_len - 1);
                        assert!(list.is_tombstoned(id));
                    }
                    None => assert_eq!(old_len, 0),
                }
            }
            _ => {
                // clear
                list.clear();
                assert!(list.is_empty());
                assert_eq!(list.allocated(), 0);
            }
        }

        assert!(list.check_invariants().is_ok());
        idx += 2;
    }
});
