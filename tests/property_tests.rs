use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use random_pqueue::RandomPQueue;
use random_pqueue::RandomPQueueError;
use std::collections::HashMap;
use std::collections::HashSet;

fn seeded(seed: u64) -> RandomPQueue<ChaCha8Rng> {
  RandomPQueue::with_rng(ChaCha8Rng::seed_from_u64(seed))
}

fn names<R>(q: &RandomPQueue<R>) -> Vec<String> {
  q.entries().map(|(_, item)| item.name().to_string()).collect()
}

proptest! {
  #[test]
  fn prop_names_are_unique(
    seed in any::<u64>(),
    inputs in prop::collection::vec("[a-cA-C]{0,2}", 0..40)
  ) {
    let mut q = seeded(seed);
    for (i, name) in inputs.iter().enumerate() {
      q.add_rare(name, i % 3 == 0);
    }

    let expected: HashSet<String> = inputs
      .iter()
      .map(|n| n.to_lowercase())
      .filter(|n| !n.is_empty())
      .collect();
    let held = names(&q);
    let held_set: HashSet<String> = held.iter().cloned().collect();
    prop_assert_eq!(held.len(), held_set.len());
    prop_assert_eq!(held_set, expected);
  }

  #[test]
  fn prop_draws_conserve_membership_and_rarity(
    seed in any::<u64>(),
    count in 0usize..30,
    rare_mask in any::<u32>(),
    draws in 0usize..300
  ) {
    let mut q = seeded(seed);
    for i in 0..count {
      q.add_rare(&format!("item{i}"), rare_mask & (1 << i) != 0);
    }
    let before: HashMap<String, bool> = q
      .entries()
      .map(|(_, item)| (item.name().to_string(), item.is_rare()))
      .collect();

    for _ in 0..draws {
      match q.get() {
        Ok(name) => prop_assert!(before.contains_key(&name)),
        Err(e) => {
          prop_assert_eq!(count, 0);
          prop_assert_eq!(e, RandomPQueueError::EmptyQueue);
        }
      }
      prop_assert_eq!(q.len(), count);
    }

    let after: HashMap<String, bool> = q
      .entries()
      .map(|(_, item)| (item.name().to_string(), item.is_rare()))
      .collect();
    prop_assert_eq!(after, before);
  }

  #[test]
  fn prop_delete_removes_exactly_one(
    seed in any::<u64>(),
    count in 1usize..30,
    pick in any::<prop::sample::Index>(),
    draws in 0usize..50
  ) {
    let mut q = seeded(seed);
    for i in 0..count {
      q.add(&format!("Item{i}"));
    }
    for _ in 0..draws {
      q.get().unwrap();
    }
    let mut expected = names(&q);
    let victim = expected.remove(pick.index(count));

    q.delete_item(&victim.to_uppercase()).unwrap();
    prop_assert!(!q.contains(&victim));
    prop_assert_eq!(names(&q), expected);
    prop_assert_eq!(
      q.delete_item(&victim),
      if count == 1 {
        Err(RandomPQueueError::EmptyQueue)
      } else {
        Err(RandomPQueueError::ItemNotFound { name: victim.clone() })
      }
    );
  }

  #[test]
  fn prop_tiny_queue_gap_is_at_least_len_minus_one(
    seed in any::<u64>(),
    count in 1usize..5,
    rare_mask in any::<u8>()
  ) {
    let mut q = seeded(seed);
    for i in 0..count {
      q.add_rare(&format!("item{i}"), rare_mask & (1 << i) != 0);
    }
    let mut last_seen: HashMap<String, usize> = HashMap::new();
    for (t, name) in q.draws().take(200).enumerate() {
      if let Some(prev) = last_seen.insert(name, t) {
        prop_assert!(t - prev - 1 >= count - 1);
      }
    }
  }
}

#[test]
fn empty_names_are_never_admitted() {
  let mut q = seeded(0);
  assert!(!q.add(""));
  assert!(!q.add_rare("", true));
  assert!(q.is_empty());
  q.add("a");
  assert!(!q.add(""));
  assert_eq!(q.len(), 1);
}
