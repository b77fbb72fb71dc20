//! End-to-end pipeline tests over realistic log lines

use matchlog::core::types::{Role, Team};
use matchlog::{parse_lines, Game};

const AREKK: &str = "arekk<78><[U:1:93699014]><Red>";
const B4NNY: &str = "b4nny<77><[U:1:10403381]><Blue>";
const YOMPS: &str = "yomps<76><[U:1:84024852]><Red>";

const AREKK_ID: &str = "[U:1:93699014]";
const B4NNY_ID: &str = "[U:1:10403381]";
const YOMPS_ID: &str = "[U:1:84024852]";

/// A log line `offset` seconds after 23:00:00
fn line(offset: u32, body: &str) -> String {
    format!("L 08/26/2018 - 23:{:02}:{:02}: {}", offset / 60, offset % 60, body)
}

fn kill(offset: u32, attacker: &str, victim: &str, weapon: &str) -> String {
    line(
        offset,
        &format!("\"{attacker}\" killed \"{victim}\" with \"{weapon}\" (attacker_position \"-1 2 3\") (victim_position \"4 5 6\")"),
    )
}

#[test]
fn test_single_round_kill() {
    let lines = vec![
        line(0, "World triggered \"Round_Start\""),
        kill(5, AREKK, B4NNY, "scattergun"),
        line(65, "World triggered \"Round_Win\" (winner \"Red\")"),
    ];
    let report = parse_lines(&lines);

    assert_eq!(report.game.rounds.len(), 1);
    assert_eq!(report.game.rounds[0].length_in_seconds, 65);
    assert_eq!(report.game.rounds[0].winner, Some(Team::Red));
    assert_eq!(report.game.total_length_in_seconds, 65);

    let a = &report.players[AREKK_ID];
    assert_eq!(a.kills, 1);
    assert_eq!(a.current_kill_streak, 1);
    let b = &report.players[B4NNY_ID];
    assert_eq!(b.deaths, 1);
    assert_eq!(b.current_kill_streak, 0);
}

#[test]
fn test_output_is_deterministic() {
    let lines = full_match();
    let first = parse_lines(&lines).to_json().unwrap();
    let second = parse_lines(&lines).to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_team_switch_attributed_to_final_team() {
    let arekk_blue = AREKK.replace("<Red>", "<Blue>");
    let lines = vec![
        line(0, "World triggered \"Round_Start\""),
        kill(5, AREKK, B4NNY, "scattergun"),
        line(
            10,
            &format!("\"{AREKK}\" triggered \"damage\" against \"{B4NNY}\" (damage \"80\") (weapon \"scattergun\")"),
        ),
        line(20, &format!("\"{AREKK}\" joined team \"Blue\"")),
        kill(30, &arekk_blue, YOMPS, "scattergun"),
        line(60, "World triggered \"Round_Win\" (winner \"Blue\")"),
    ];
    let report = parse_lines(&lines);

    assert_eq!(report.teams["Red"].kills, 0);
    assert_eq!(report.teams["Red"].damage, 0);
    assert_eq!(report.teams["Blue"].kills, 2);
    assert_eq!(report.teams["Blue"].damage, 80);
    assert_eq!(report.players[AREKK_ID].team, Team::Blue);
}

#[test]
fn test_nothing_counted_before_round_start() {
    let lines = vec![
        kill(0, AREKK, B4NNY, "scattergun"),
        line(1, &format!("\"{AREKK}\" say \"warmup\"")),
        line(2, "World triggered \"Round_Start\""),
        kill(3, AREKK, B4NNY, "scattergun"),
    ];
    let report = parse_lines(&lines);
    assert_eq!(report.players[AREKK_ID].kills, 1);
    // chat is not gated on live state
    assert_eq!(report.chat.len(), 1);
    assert_eq!(report.chat[0].time_in_seconds, 0);
}

#[test]
fn test_noise_lines_are_ignored() {
    let mut game = Game::new();
    for raw in [
        "Log file started (file \"logs/L0826002.log\") (game \"/tf\") (version \"4630212\")",
        "",
        "L 08/26/2018 - 23:00:00: rcon from \"127.0.0.1:27015\": command \"mp_tournament 1\"",
        "L 08/26/2018 - 23:00:01: server_cvar: \"sv_cheats\" \"0\"",
        "L 08/26/2018 - 23:00:02: \"broken token\" killed \"also broken\" with \"knife\"",
    ] {
        game.process_line(raw);
    }
    let stats = game.line_stats();
    assert_eq!(stats.lines, 5);
    assert_eq!(stats.malformed, 2);
    assert_eq!(stats.unrecognized, 2);
    assert_eq!(stats.dropped, 1);
    assert_eq!(stats.dispatched, 0);
}

fn full_match() -> Vec<String> {
    vec![
        line(0, "Started map \"cp_process_final\" (crc \"c8ddf7ef4ffa5f5e6c8d4bd2cbeebd64\")"),
        line(2, "World triggered \"Round_Start\""),
        line(2, &format!("\"{AREKK}\" spawned as \"Scout\"")),
        line(2, &format!("\"{B4NNY}\" spawned as \"Soldier\"")),
        line(2, &format!("\"{YOMPS}\" spawned as \"Medic\"")),
        line(3, &format!("\"{AREKK}\" triggered \"shot_fired\" (weapon \"scattergun\")")),
        line(3, &format!("\"{AREKK}\" triggered \"shot_hit\" (weapon \"scattergun\")")),
        line(
            3,
            &format!("\"{AREKK}\" triggered \"damage\" against \"{B4NNY}\" (damage \"60\") (realdamage \"60\") (weapon \"scattergun\")"),
        ),
        line(
            4,
            &format!("\"{YOMPS}\" triggered \"healed\" against \"{AREKK}\" (healing \"24\")"),
        ),
        line(
            5,
            &format!("\"{B4NNY}\" triggered \"damage\" against \"{AREKK}\" (damage \"90\") (weapon \"quake_rl\") (airshot \"1\")"),
        ),
        kill(6, AREKK, B4NNY, "scattergun"),
        line(
            6,
            &format!("\"{YOMPS}\" triggered \"kill assist\" against \"{B4NNY}\" (assister_position \"1 1 1\")"),
        ),
        line(7, &format!("\"{YOMPS}\" triggered \"chargedeployed\" (medigun \"kritzkrieg\")")),
        line(8, &format!("\"{AREKK}\" picked up item \"medkit_small\"")),
        line(
            40,
            &format!("Team \"Red\" triggered \"pointcaptured\" (cp \"2\") (cpname \"#Gravelpit_cap_A\") (numcappers \"2\") (player1 \"{AREKK}\") (position1 \"0 0 0\") (player2 \"{YOMPS}\") (position2 \"0 0 0\")"),
        ),
        line(41, &format!("\"{B4NNY}\" say \"gg\"")),
        line(42, &format!("\"{AREKK}\" say_team \"push mid\"")),
        line(90, "World triggered \"Round_Win\" (winner \"Red\")"),
        line(90, "Team \"Red\" current score \"1\" with \"6\" players"),
        line(90, "Team \"Blue\" current score \"0\" with \"6\" players"),
        line(91, "World triggered \"Game_Over\" reason \"Reached Win Limit\""),
        line(91, "Team \"Red\" final score \"1\" with \"6\" players"),
    ]
}

#[test]
fn test_full_match_sections() {
    let report = parse_lines(full_match());

    assert_eq!(report.game.map.as_deref(), Some("cp_process_final"));
    assert_eq!(report.game.names[AREKK_ID], "arekk");
    let round = &report.game.rounds[0];
    assert_eq!(round.length_in_seconds, 88);
    assert_eq!((round.red_score, round.blu_score), (1, 0));
    assert_eq!(round.events.len(), 1);

    let arekk = &report.players[AREKK_ID];
    assert_eq!(arekk.kills, 1);
    assert_eq!(arekk.damage, 60);
    assert_eq!(arekk.damage_taken, 90);
    assert_eq!(arekk.healing_received, 24);
    assert_eq!(arekk.captures, 1);
    assert_eq!(report.players[B4NNY_ID].airshots, 1);

    let yomps = &report.players[YOMPS_ID];
    assert_eq!(yomps.assists, 1);
    assert_eq!(yomps.charges_by_type["kritzkrieg"], 1);

    assert_eq!(report.teams["Red"].captures, 1);
    assert_eq!(report.teams["Red"].midfights, 1);
    assert_eq!(report.teams["Red"].kills, 1);
    assert_eq!(report.teams["Blue"].damage, 90);

    let scout = &report.player_classes[AREKK_ID][Role::Scout.as_str()];
    assert_eq!(scout.playtime_in_seconds, 88);
    assert_eq!(scout.weapons["scattergun"].shots, 1);
    assert_eq!(scout.weapons["scattergun"].hits, 1);
    assert_eq!(report.player_classes[YOMPS_ID]["medic"].healing, 24);

    assert_eq!(report.pvp[AREKK_ID][B4NNY_ID].kills, 1);
    assert_eq!(report.pvp[YOMPS_ID][B4NNY_ID].assists, 1);
    assert_eq!(report.pvc[AREKK_ID]["soldier"].kills, 1);
    assert_eq!(report.pvc[B4NNY_ID]["scout"].deaths, 1);

    assert_eq!(report.real_damage[AREKK_ID], 60);
    assert_eq!(report.real_damage[B4NNY_ID], 90);

    assert_eq!(report.chat.len(), 2);
    assert_eq!(report.chat[0].time_in_seconds, 39);
    assert!(report.chat[1].team_only);
}

#[test]
fn test_engineer_and_medic_lines() {
    let lines = vec![
        line(0, "World triggered \"Round_Start\""),
        line(0, &format!("\"{YOMPS}\" spawned as \"Medic\"")),
        line(10, &format!("\"{YOMPS}\" changed role to \"Engineer\"")),
        line(
            12,
            &format!("\"{YOMPS}\" triggered \"player_builtobject\" (object \"OBJ_SENTRYGUN\") (position \"1 2 3\")"),
        ),
        line(
            13,
            &format!("\"{YOMPS}\" triggered \"player_builtobject\" (object \"OBJ_DISPENSER\") (position \"4 5 6\")"),
        ),
        line(
            14,
            &format!("\"{B4NNY}\" triggered \"medic_death\" against \"{AREKK}\" (healing \"500\") (ubercharge \"1\")"),
        ),
        line(
            15,
            &format!("\"{AREKK}\" triggered \"flagevent\" (event \"picked up\") (position \"0 0 0\")"),
        ),
        line(20, &format!("\"{YOMPS}\" disconnected (reason \"Disconnect by user.\")")),
        line(60, "World triggered \"Round_Win\" (winner \"Red\")"),
    ];

    let mut game = Game::new();
    for raw in &lines {
        game.process_line(raw);
    }
    let stats = game.line_stats();
    assert_eq!(stats.dispatched, lines.len() as u64);
    assert_eq!(stats.dropped, 0);

    let report = game.into_report();
    assert_eq!(report.players[YOMPS_ID].sentries_built, 1);
    assert_eq!(report.players[AREKK_ID].drops, 1);
    assert_eq!(report.teams["Red"].drops, 1);
    assert_eq!(report.teams["Blue"].drops, 0);

    let classes = &report.player_classes[YOMPS_ID];
    assert_eq!(classes["medic"].playtime_in_seconds, 10);
    assert_eq!(classes["engineer"].playtime_in_seconds, 10);
}
