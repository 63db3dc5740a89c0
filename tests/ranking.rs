use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use ranklist::{Error, Options, RankList};

fn board(seed: u64) -> RankList<String, i64> {
  RankList::with_options(Options::new().with_seed(Some(seed))).unwrap()
}

fn collect(range: impl Iterator<Item = (String, i64)>) -> Vec<(String, i64)> {
  range.collect()
}

fn owned<'a>(it: impl Iterator<Item = &'a ranklist::Entry<String, i64>>) -> Vec<(String, i64)> {
  it.map(|ent| (ent.identity().clone(), ent.score())).collect()
}

fn expected(model: &HashMap<String, i64>, low: i64, high: i64) -> Vec<(String, i64)> {
  let mut hits: Vec<_> = model
    .iter()
    .filter(|(_, score)| (low..=high).contains(*score))
    .map(|(id, score)| (id.clone(), *score))
    .collect();
  hits.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
  hits
}

#[test]
fn leaderboard_scenario() {
  let mut l = board(1);
  l.upsert("A".into(), 10).unwrap();
  l.upsert("B".into(), 5).unwrap();
  l.upsert("C".into(), 20).unwrap();

  assert_eq!(
    owned(l.range_by_score(5, 15).unwrap()),
    [("B".to_string(), 5), ("A".to_string(), 10)]
  );

  l.upsert("A".into(), 30).unwrap();
  assert_eq!(owned(l.range_by_score(5, 15).unwrap()), [("B".to_string(), 5)]);
  assert_eq!(
    owned(l.range_by_score(15, 30).unwrap()),
    [("C".to_string(), 20), ("A".to_string(), 30)]
  );

  assert!(l.delete("B"));
  assert!(!l.contains("B"));
  assert_eq!(l.len(), 2);
  l.validate().unwrap();
}

#[test]
fn random_operations_match_brute_force() {
  let mut rng = StdRng::seed_from_u64(0xdead_beef);
  let mut l = board(2);
  let mut model: HashMap<String, i64> = HashMap::new();

  for step in 0..20_000 {
    let id = format!("player-{}", rng.random_range(0..500));
    match rng.random_range(0..10) {
      0..=5 => {
        let score = rng.random_range(-1_000..1_000);
        l.upsert(id.clone(), score).unwrap();
        model.insert(id, score);
      }
      6 | 7 => {
        assert_eq!(l.delete(id.as_str()), model.remove(&id).is_some());
      }
      8 => {
        let score = match model.get(&id) {
          Some(score) if rng.random_bool(0.5) => *score,
          _ => rng.random_range(-1_000..1_000),
        };
        let hit = model.get(&id) == Some(&score);
        assert_eq!(l.delete_exact(id.as_str(), score), hit);
        if hit {
          model.remove(&id);
        }
      }
      _ => {
        assert_eq!(l.score_of(id.as_str()), model.get(&id).copied());
        assert_eq!(l.contains(id.as_str()), model.contains_key(&id));
      }
    }

    assert_eq!(l.len(), model.len());

    if step % 500 == 0 {
      l.validate().unwrap();
      let low = rng.random_range(-1_100..1_100);
      let high = rng.random_range(low..1_200);
      assert_eq!(owned(l.range_by_score(low, high).unwrap()), expected(&model, low, high));
    }
  }

  l.validate().unwrap();
  assert_eq!(owned(l.iter()), expected(&model, i64::MIN, i64::MAX));
}

#[test]
fn range_matches_brute_force_everywhere() {
  let mut rng = StdRng::seed_from_u64(7);
  let mut l = board(3);
  let mut model = HashMap::new();
  for id in 0..300 {
    let score = rng.random_range(0..100);
    l.upsert(format!("{id:03}"), score).unwrap();
    model.insert(format!("{id:03}"), score);
  }

  for low in -2..102 {
    for high in low..102 {
      assert_eq!(
        owned(l.range_by_score(low, high).unwrap()),
        expected(&model, low, high),
        "[{low}, {high}]"
      );
    }
  }
}

#[test]
fn capped_range_scan() {
  let mut l = board(4);
  for id in 0..1_000 {
    l.upsert(format!("{id:04}"), id % 10).unwrap();
  }

  let capped = collect(
    l.range_by_score(3, 3)
      .unwrap()
      .take(5)
      .map(|ent| (ent.identity().clone(), ent.score())),
  );
  assert_eq!(capped.len(), 5);
  assert!(capped.iter().all(|(_, score)| *score == 3));
  assert!(capped.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn top_n_from_highest() {
  let mut l = board(5);
  for (id, score) in [("a", 40), ("b", 90), ("c", 70), ("d", 10), ("e", 90)] {
    l.upsert(id.into(), score).unwrap();
  }

  let len = l.len();
  let mut top: Vec<_> = l.rank_range(len - 3, 3).map(|ent| ent.identity().as_str()).collect();
  top.reverse();
  assert_eq!(top, ["e", "b", "c"]);
  assert_eq!(l.last().map(|ent| ent.identity().as_str()), Some("e"));
}

#[test]
fn errors_leave_the_list_untouched() {
  let mut l = board(6);
  l.upsert("a".into(), 1).unwrap();
  let before = l.debug_dump();

  assert_eq!(l.upsert(String::new(), 3), Err(Error::InvalidIdentity));
  assert_eq!(l.range_by_score(3, 1).err(), Some(Error::InvertedRange));
  assert!(!l.delete("missing"));
  assert!(!l.delete_exact("a", 2));
  assert_eq!(l.debug_dump(), before);
  assert_eq!(l.score_of("a"), Some(1));
}

#[test]
fn invalid_options_are_rejected() {
  assert_eq!(
    RankList::<String, i64>::with_options(Options::new().with_max_height(40)).err(),
    Some(Error::InvalidMaxHeight(40))
  );
  assert_eq!(
    RankList::<String, i64>::with_options(Options::new().with_probability(1.0)).err(),
    Some(Error::InvalidProbability)
  );
}

#[test]
fn same_seed_same_shape() {
  let mut a = board(9);
  let mut b = board(9);
  for id in 0..500 {
    let score = (id * 31) % 77;
    a.upsert(format!("{id}"), score).unwrap();
    b.upsert(format!("{id}"), score).unwrap();
  }
  assert_eq!(a.height(), b.height());
  assert_eq!(a.debug_dump(), b.debug_dump());
}
