use chipmult_core::{
    default_hand_base, Card, HandKind, Rank, RunState, ScoreTables, Scorer, HAND_SIZE,
};
use chipmult_data::{find_joker, load_game_config, load_jokers, CardModifierRules};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn cards(specs: &[&str]) -> Vec<Card> {
    specs
        .iter()
        .map(|spec| spec.parse().expect("card text"))
        .collect()
}

#[test]
fn bundled_tables_match_builtin_defaults() {
    let config = load_game_config(&assets_root()).expect("load config");
    assert_eq!(config.hand_size, HAND_SIZE);
    assert_eq!(config.hands.len(), HandKind::ALL.len());
    assert_eq!(config.ranks.len(), Rank::ALL.len());
    assert_eq!(config.card_modifiers, CardModifierRules::default());

    let tables = ScoreTables::from_config(&config);
    for kind in HandKind::ALL {
        assert_eq!(tables.hand_base(kind), default_hand_base(kind), "{kind:?}");
    }
    for rank in Rank::ALL {
        assert_eq!(tables.rank_chips(rank), rank.base_chips(), "{rank:?}");
    }
}

#[test]
fn bundled_jokers_load_in_file_order() {
    let jokers = load_jokers(&assets_root()).expect("load jokers");
    let ids: Vec<&str> = jokers.iter().map(|joker| joker.id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"joker"));
    assert!(find_joker(&jokers, "JOLLY").is_some());
    assert!(find_joker(&jokers, "missing").is_none());
}

#[test]
fn bundled_jokers_score_through_the_pass() {
    let config = load_game_config(&assets_root()).expect("load config");
    let jokers = load_jokers(&assets_root()).expect("load jokers");
    let mut scorer = Scorer::new(ScoreTables::from_config(&config));
    for id in ["jolly", "sly", "half"] {
        let joker = find_joker(&jokers, id).expect("joker").clone();
        scorer.register(joker);
    }
    let breakdown = scorer.play(&cards(&["8S", "8D"])).expect("score");
    // (10 + 8 + 8 + 50) chips, (2 + 8 + 20) mult
    assert_eq!(breakdown.hand, HandKind::Pair);
    assert_eq!(breakdown.score, 76 * 30);

    let five = scorer
        .play(&cards(&["8S", "8D", "3C", "JH", "KS"]))
        .expect("score");
    // half joker skips five-card plays: (10 + 8 + 8 + 3 + 10 + 10 + 50) * (2 + 8)
    assert_eq!(five.score, 99 * 10);
}

#[test]
fn run_state_uses_loaded_config() {
    let config = load_game_config(&assets_root()).expect("load config");
    let mut run = RunState::new(config, 2024);
    let mut events = chipmult_core::EventBus::default();
    assert_eq!(run.deal(&mut events).expect("deal"), HAND_SIZE);
    let breakdown = run.play(&[0, 1, 2], &mut events).expect("play");
    assert_eq!(run.score, breakdown.score);
    assert!(breakdown.score > 0);
}
