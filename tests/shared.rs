use std::{
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  thread,
};

use parking_lot::RwLock;
use ranklist::{Options, RankList};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn list_is_send_and_sync() {
  assert_send_sync::<RankList<String, i64>>();
  assert_send_sync::<RankList<u64, f64>>();
}

#[test]
fn readers_share_writers_exclude() {
  const WRITES: u64 = 5_000;

  let list = Arc::new(RwLock::new(
    RankList::<u64, u64>::with_options(Options::new().with_seed(Some(3))).unwrap(),
  ));
  let stop = Arc::new(AtomicBool::new(false));

  let readers: Vec<_> = (0..4)
    .map(|_| {
      let list = list.clone();
      let stop = stop.clone();
      thread::spawn(move || {
        let mut scans = 0usize;
        while !stop.load(Ordering::Acquire) {
          // Collect under the shared lock, check after releasing it.
          let snapshot: Vec<_> = {
            let l = list.read();
            let hits = l
              .range_by_score(100, 900)
              .unwrap()
              .map(|ent| (ent.score(), *ent.identity()))
              .collect();
            hits
          };
          assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
          assert!(snapshot.iter().all(|(score, _)| (100..=900).contains(score)));
          scans += 1;
        }
        scans
      })
    })
    .collect();

  for i in 0..WRITES {
    let mut l = list.write();
    l.upsert(i % 700, (i * 7_919) % 1_000).unwrap();
    if i % 3 == 0 {
      l.delete(&((i / 3) % 700));
    }
  }
  stop.store(true, Ordering::Release);

  for reader in readers {
    reader.join().unwrap();
  }

  let l = list.read();
  l.validate().unwrap();
  assert!(l.len() <= 700);
}
