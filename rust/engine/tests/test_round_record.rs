use std::fs;

use blackjack_engine::cards::{Card, Rank as R, Suit as S};
use blackjack_engine::deck::Shoe;
use blackjack_engine::engine::{DealerMode, Engine};
use blackjack_engine::game::Phase;
use blackjack_engine::logger::{format_round_id, RoundLogger, RoundRecord};
use blackjack_engine::player::{HandStatus, PlayerAction};
use blackjack_engine::settlement::Outcome;

fn played_engine() -> Engine {
    // 10+6 hits a 3, dealer 10+7
    let cards = [R::Ten, R::Ten, R::Six, R::Seven, R::Three]
        .iter()
        .map(|&r| Card::new(r, S::Spades))
        .collect();
    let mut e = Engine::with_shoe(Shoe::stacked(cards, 1), 100, DealerMode::Immediate);
    e.start_round(1, 10).unwrap();
    e.hit();
    let snap = e.stand();
    assert_eq!(snap.phase, Phase::Finished);
    e
}

#[test]
fn record_captures_actions_hands_and_money() {
    let e = played_engine();
    let rec = e.round_record(format_round_id("20250102", 1)).unwrap();
    assert_eq!(rec.round_id, "20250102-000001");
    assert_eq!(rec.seed, None);
    assert_eq!(rec.actions.len(), 2);
    assert_eq!(rec.actions[0].action, PlayerAction::Hit);
    assert_eq!(rec.actions[0].card, Some(Card::new(R::Three, S::Spades)));
    assert_eq!(rec.dealer.len(), 2);
    assert_eq!(rec.hands[0].status, HandStatus::Stood);
    assert_eq!(rec.hands[0].outcome, Outcome::Win);
    assert_eq!(rec.stake, 10);
    assert_eq!(rec.total_payout, 20);
    assert_eq!(rec.net, 10);
    assert_eq!(rec.bankroll_after, 110);
    assert!(rec.is_balanced());
}

#[test]
fn surrendered_round_records_its_refund() {
    let cards = [R::Ten, R::Ten, R::Six, R::Seven]
        .iter()
        .map(|&r| Card::new(r, S::Hearts))
        .collect();
    let mut e = Engine::with_shoe(Shoe::stacked(cards, 1), 100, DealerMode::Immediate);
    e.start_round(1, 10).unwrap();
    assert_eq!(e.surrender().phase, Phase::Finished);

    let rec = e.round_record("20250102-000003").unwrap();
    assert_eq!(rec.total_payout, 0);
    assert_eq!(rec.net, -10);
    assert_eq!(rec.surrender_refunds, 5);
    assert_eq!(rec.bankroll_after, 95);
    assert_eq!(100 + rec.net + rec.surrender_refunds as i64, rec.bankroll_after as i64);
    assert!(rec.is_balanced());
}

#[test]
fn records_without_refund_field_still_parse() {
    let mut json = serde_json::to_value(played_engine().round_record("x").unwrap()).unwrap();
    json.as_object_mut().unwrap().remove("surrender_refunds");
    let rec: RoundRecord = serde_json::from_value(json).unwrap();
    assert_eq!(rec.surrender_refunds, 0);
}

#[test]
fn logger_writes_one_json_object_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("rounds.jsonl");
    let e = played_engine();

    let mut logger = RoundLogger::create(&path).expect("create logger");
    for _ in 0..2 {
        let id = logger.next_id();
        logger.write(&e.round_record(id).unwrap()).expect("write");
    }

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with('\n'));
    assert!(!content.contains('\r'));
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let recs: Vec<RoundRecord> = lines
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(recs[0].round_id.ends_with("-000001"));
    assert!(recs[1].round_id.ends_with("-000002"));
    for r in &recs {
        let ts = r.ts.as_deref().expect("timestamp injected");
        assert!(ts.ends_with('Z'), "{}", ts);
    }
}

#[test]
fn records_use_lowercase_actions_and_statuses() {
    let e = played_engine();
    let rec = e.round_record("20250102-000009").unwrap();
    let v = serde_json::to_value(&rec).unwrap();
    assert_eq!(v["actions"][0]["action"], "hit");
    assert_eq!(v["hands"][0]["status"], "stood");
}

#[test]
fn unbalanced_record_is_detected() {
    let e = played_engine();
    let mut rec = e.round_record("x").unwrap();
    rec.net = 11;
    assert!(!rec.is_balanced());
}

#[test]
fn seeded_engine_records_its_seed() {
    let mut e = Engine::new(Some(99));
    let mut snap = e.start_round(2, 10).unwrap();
    while snap.phase == Phase::Playing {
        snap = e.stand();
    }
    assert_eq!(e.round_record("r").unwrap().seed, Some(99));
}
