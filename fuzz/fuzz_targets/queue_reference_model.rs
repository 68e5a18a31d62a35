#![no_main]

use libfuzzer_sys::fuzz_target;
use cachequeue::queue::FastRemovalQueue;
use std::collections::VecDeque;

// Fuzz FastRemovalQueue against a deduplicating VecDeque reference
//
// Every operation result and the final order must match the model.
fuzz_target!(|data: &[u8]| {
    let queue: FastRemovalQueue<u8> = FastRemovalQueue::new();
    let mut reference: VecDeque<u8> = VecDeque::new();

    for pair in data.chunks_exact(2) {
        let element = pair[1] % 64;
        match pair[0] % 5 {
            0 => {
                let fresh = !reference.contains(&element);
                assert_eq!(queue.add(element), fresh);
                if fresh {
                    reference.push_back(element);
                }
            }
            1 => {
                let pos = reference.iter().position(|e| *e == element);
                assert_eq!(queue.remove(&element), pos.is_some());
                if let Some(pos) = pos {
                    reference.remove(pos);
                }
            }
            2 => {
                let pos = reference.iter().position(|e| *e == element);
                assert_eq!(queue.move_to_tail(&element), pos.is_some());
                if let Some(pos) = pos {
                    reference.remove(pos);
                    reference.push_back(element);
                }
            }
            3 => {
                assert_eq!(queue.poll(), reference.pop_front());
            }
            _ => {
                queue.clear();
                reference.clear();
            }
        }
    }

    assert!(queue.check_invariants().is_ok());
    assert_eq!(queue.to_vec(), Vec::from(reference));
});
