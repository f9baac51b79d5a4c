mod common;

use game_core::state::CurrentDungeon;
use game_core::{
    ActionRef, Dice, DungeonError, DungeonRun, EncounterPhase, Enemy, Env, GameConfig, Minion,
    PcgRng,
};

use common::{crypt, hero, spawn, world};

fn slash() -> ActionRef {
    ActionRef::Attack("slash".into())
}

#[test]
fn victory_needs_the_whole_pack_down() {
    let tables = crypt();
    let rng = PcgRng;
    let config = GameConfig::default();
    let mut game = world(&tables);
    let mut hero = hero();

    let mut enemy = Enemy::new(spawn(&tables, "rat", "rat-0"));
    enemy.minions.push(Minion::new(spawn(&tables, "rat", "rat-1"), 5));
    enemy.minions.push(Minion::new(spawn(&tables, "rat", "rat-2"), 5));
    hero.current_dungeon = Some(CurrentDungeon {
        instance: "crypt".into(),
        level: "1".into(),
        enemy: Some(enemy),
        ..CurrentDungeon::default()
    });

    let env = Env::with_all(&tables, &rng, &config).into_game_env();
    let mut run = DungeonRun::new(&mut game, &mut hero, env, Dice::new(&rng, 11)).unwrap();

    // Leader down, two minions still standing
    let report = run.player_action(&slash(), Some(&[0])).unwrap();
    assert_eq!(report.outcome(), Some(EncounterPhase::AwaitingPlayerAction));
    assert!(report.rewards.is_none());

    let report = run.player_action(&slash(), Some(&[1])).unwrap();
    assert_eq!(report.outcome(), Some(EncounterPhase::AwaitingPlayerAction));
    let enemy = run.dungeon().unwrap().enemy.as_ref().unwrap();
    assert_eq!(enemy.alive_count(), 1);

    let report = run.player_action(&slash(), Some(&[1])).unwrap();
    assert_eq!(report.outcome(), Some(EncounterPhase::Victory));
    // floor of a roll in [4, 5), from the leader's template
    assert_eq!(report.rewards.unwrap().gold, 4.0);
    assert!(run.dungeon().unwrap().enemy.is_none());
    assert!(run.dungeon().unwrap().tile_won);
}

#[test]
fn multi_hit_attack_lands_every_hit() {
    let tables = crypt();
    let rng = PcgRng;
    let config = GameConfig::default();
    let mut game = world(&tables);
    let mut hero = hero();
    hero.current_dungeon = Some(CurrentDungeon {
        instance: "crypt".into(),
        level: "1".into(),
        enemy: Some(Enemy::new(spawn(&tables, "brute", "brute-0"))),
        ..CurrentDungeon::default()
    });

    let env = Env::with_all(&tables, &rng, &config).into_game_env();
    let mut run = DungeonRun::new(&mut game, &mut hero, env, Dice::new(&rng, 3)).unwrap();

    let report = run
        .player_action(&ActionRef::Attack("flurry".into()), None)
        .unwrap();
    // 3 hits of 10 attack power
    assert_eq!(report.actions[0].targets[0].damage, 30.0);
    let brute = &run.dungeon().unwrap().enemy.as_ref().unwrap().base;
    assert_eq!(brute.health(), 70.0);
}

#[test]
fn boss_opens_once_enough_rooms_are_won() {
    let tables = crypt();
    let rng = PcgRng;
    let config = GameConfig::default();
    let mut game = world(&tables);
    let mut hero = hero();
    let env = Env::with_all(&tables, &rng, &config).into_game_env();
    let mut run = DungeonRun::new(&mut game, &mut hero, env, Dice::new(&rng, 5)).unwrap();

    run.start_dungeon("crypt", "1").unwrap();
    let dungeon = run.dungeon().unwrap();
    assert_eq!(dungeon.dungeon_map.len(), 12);
    assert!(dungeon.dungeon_map.iter().any(|tile| tile.is_boss_room));
    assert!(matches!(
        run.start_dungeon("crypt", "1"),
        Err(DungeonError::AlreadyInDungeon)
    ));

    for _ in 0..4 {
        run.advance_step().unwrap();
    }
    assert!(matches!(
        run.load_boss(),
        Err(DungeonError::BossNotReady {
            step: 4,
            required: 5
        })
    ));

    assert_eq!(run.advance_step().unwrap(), 5);
    assert_eq!(run.load_boss().unwrap(), "brute");
    assert!(run.dungeon().unwrap().fighting_boss);
    assert_eq!(run.phase(), Some(EncounterPhase::AwaitingPlayerAction));
    assert!(matches!(
        run.leave_dungeon(),
        Err(DungeonError::EncounterActive)
    ));
}
