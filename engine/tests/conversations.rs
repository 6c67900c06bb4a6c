//! End-to-end conversation flows through the engine.

use std::time::Duration;

use codon_engine::{Engine, EngineOptions, Reply, UserId};

const USER: UserId = UserId::new(7);

fn engine() -> Engine {
    Engine::new(EngineOptions::default())
}

/// Drive a scripted conversation and return the last reply.
fn run(engine: &mut Engine, script: &[&str]) -> Reply {
    let mut last = engine.welcome();
    for input in script {
        last = engine.handle(USER, input);
    }
    last
}

#[test]
fn base_conversion_walkthrough() {
    let mut engine = engine();
    let reply = run(&mut engine, &["1", "1", "FF", "16", "2"]);
    assert!(
        reply.contains("FF (base 16) = 11111111 (base 2)"),
        "got: {}",
        reply.text()
    );
    assert!(reply.contains("Steps:"));
    assert!(reply.contains("Type 'menu' to run another calculator."));
}

#[test]
fn bad_base_is_rejected_then_recovered() {
    let mut engine = engine();
    let reply = run(&mut engine, &["1", "1", "FF", "99"]);
    assert!(reply.contains("outside the allowed range 2..=36"));

    let reply = engine.handle(USER, "16");
    assert!(reply.contains("Enter the target base"));

    let reply = engine.handle(USER, "10");
    assert!(reply.contains("FF (base 16) = 255 (base 10)"));
}

#[test]
fn audio_solves_for_sample_rate() {
    let mut engine = engine();
    let reply = run(&mut engine, &["1", "5", "2", "10584000", "16", "60", "2"]);
    assert!(
        reply.contains("Sample rate: 44100.00 Hz"),
        "got: {}",
        reply.text()
    );
}

#[test]
fn hamming_code_walkthrough() {
    let mut engine = engine();
    let reply = run(&mut engine, &["2", "2", "1", "1011"]);
    assert!(reply.contains("Encoded: 0110011"));
    assert!(reply.contains("Parity bits: 3"));
}

#[test]
fn control_number_via_the_detection_menu() {
    let mut engine = engine();
    let reply = run(&mut engine, &["2", "1", "4", "84375"]);
    assert!(reply.contains("Control number: 6 (mod 9)"));
}

#[test]
fn koi8_decode_walkthrough() {
    let mut engine = engine();
    let reply = run(&mut engine, &["1", "7", "2", "0100100001101001"]);
    assert!(reply.contains("Decoded: Hi"));
}

#[test]
fn expired_session_restarts_at_the_main_menu() {
    let mut engine = Engine::new(EngineOptions {
        session_timeout: Duration::from_millis(1),
        ..EngineOptions::default()
    });
    engine.handle(USER, "1");
    std::thread::sleep(Duration::from_millis(10));

    let reply = engine.handle(USER, "1");
    assert!(reply.contains("Your session expired after inactivity."));
    assert!(reply.contains("Main menu:"));

    // The restarted session routes the next pick from the main menu.
    let reply = engine.handle(USER, "2");
    assert!(reply.contains("Codes and error control:"));
}

#[test]
fn shortened_timeout_expires_the_running_session() {
    let mut engine = engine();
    run(&mut engine, &["2"]);

    engine.set_session_timeout(Duration::from_millis(1));
    std::thread::sleep(Duration::from_millis(10));

    let reply = engine.handle(USER, "1");
    assert!(reply.contains("Your session expired after inactivity."));
}

#[test]
fn menu_command_interrupts_a_flow() {
    let mut engine = engine();
    run(&mut engine, &["2", "2", "1"]);
    let reply = engine.handle(USER, "menu");
    assert!(reply.contains("Main menu:"));

    // Data bits meant for the abandoned flow are just a bad menu pick now.
    let reply = engine.handle(USER, "1011");
    assert!(reply.contains("Pick one of the numbered options."));
}

#[test]
fn finished_flow_returns_to_the_main_menu() {
    let mut engine = engine();
    let reply = run(&mut engine, &["2", "1", "1", "1010"]);
    assert!(reply.contains("Encoded: 10100"));

    let reply = engine.handle(USER, "1");
    assert!(reply.contains("Number systems and encoding:"));
}
