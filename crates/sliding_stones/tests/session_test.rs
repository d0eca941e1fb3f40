//! Scripted play sessions.

use sliding_stones::{Input, Reply, Session, run};
use sliding_stones_core::{Direction, Layout, Piece, Position};

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        Reply::Quit => panic!("session quit unexpectedly"),
    }
}

fn anchor(session: &Session, id: &str) -> Option<Position> {
    session.store().piece(id).map(Piece::position)
}

#[test]
fn test_parse_commands() {
    assert_eq!("select L4".parse::<Input>().unwrap(), Input::Select("L4".into()));
    assert_eq!("UP".parse::<Input>().unwrap(), Input::Step(Direction::Up));
    assert_eq!(
        "drag 120 -5".parse::<Input>().unwrap(),
        Input::Drag {
            dx: 120.0,
            dy: -5.0
        }
    );
    assert_eq!(
        "wait 250".parse::<Input>().unwrap(),
        Input::Wait(std::time::Duration::from_millis(250))
    );
    assert!("".parse::<Input>().is_err());
    assert!("jump".parse::<Input>().is_err());
    assert!("drag 1".parse::<Input>().is_err());
    assert!("drag NaN 0".parse::<Input>().is_err());
}

#[test]
fn test_move_requires_selection() {
    let mut session = Session::with_layout(Layout::Standard);
    let reply = text(session.handle_line("right"));
    assert_eq!(reply, "Select a piece first\n");
    assert_eq!(session.store().move_count(), 0);
}

#[test]
fn test_unknown_piece_selection() {
    let mut session = Session::with_layout(Layout::Standard);
    let reply = text(session.handle_line("select ghost"));
    assert_eq!(reply, "No piece named ghost\n");
}

#[test]
fn test_blocked_step_reports_reason() {
    let mut session = Session::with_layout(Layout::Standard);
    text(session.handle_line("select square"));
    let reply = text(session.handle_line("key ArrowDown"));
    assert_eq!(reply, "square cannot move down\n");
}

#[test]
fn test_drag_and_release() {
    let mut session = Session::with_layout(Layout::Standard);
    text(session.handle_line("select square"));
    let reply = text(session.handle_line("drag -90 10"));
    assert!(reply.contains("+##."));
    text(session.handle_line("release"));
    assert_eq!(anchor(&session, "square"), Some(Position::new(4, 0)));
    assert_eq!(session.store().move_count(), 1);
}

#[test]
fn test_short_swipe_is_ignored() {
    let mut session = Session::with_layout(Layout::Standard);
    text(session.handle_line("select square"));
    assert_eq!(text(session.handle_line("swipe 20 5")), "Swipe too short\n");
    text(session.handle_line("swipe 45 5"));
    assert_eq!(anchor(&session, "square"), Some(Position::new(4, 2)));
}

#[test]
fn test_hint_lists_reachable_anchors() {
    let mut session = Session::with_layout(Layout::Standard);
    assert_eq!(text(session.handle_line("hint")), "Movable pieces: square\n");
    text(session.handle_line("select square"));
    assert_eq!(
        text(session.handle_line("hint")),
        "square can reach: (4, 2) (4, 0)\n"
    );
    text(session.handle_line("select L1"));
    assert_eq!(text(session.handle_line("hint")), "L1 cannot move\n");
}

#[test]
fn test_near_win_then_wait() {
    let mut session = Session::with_layout(Layout::NearWin);
    text(session.handle_line("select L4"));
    let reply = text(session.handle_line("up"));
    assert!(reply.ends_with("Moves: 1. Solved!\n"));
    assert!(!session.store().is_won());

    assert_eq!(text(session.handle_line("wait 499")), "Moves: 1. Solved!\n");
    assert_eq!(
        text(session.handle_line("wait 1")),
        "Solved in 1 moves. The optimal solution takes 22.\n"
    );
    assert!(session.store().is_won());
}

#[test]
fn test_reset_and_quit() {
    let mut session = Session::with_layout(Layout::NearWin);
    text(session.handle_line("select L4"));
    text(session.handle_line("up"));
    text(session.handle_line("reset"));
    assert_eq!(session.store().move_count(), 0);
    assert_eq!(anchor(&session, "L4"), Some(Position::new(3, 2)));
    assert_eq!(session.handle_line("quit"), Reply::Quit);
}

#[tokio::test(start_paused = true)]
async fn test_scripted_run_latches_win() {
    let mut session = Session::with_layout(Layout::NearWin);
    let script = b"select L4\n\nup\nwait 500\nquit\nshow\n";
    let mut output = Vec::new();

    run(&mut session, &script[..], &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.starts_with("Commands:"));
    assert!(output.contains("Solved in 1 moves."));
    assert!(session.store().is_won());
}

#[tokio::test(start_paused = true)]
async fn test_scripted_waits_count_once() {
    let mut session = Session::with_layout(Layout::NearWin);
    let script = b"select L4\nup\nwait 300\nwait 150\n";
    let mut output = Vec::new();

    run(&mut session, &script[..], &mut output).await.unwrap();
    assert!(!session.store().is_won());
    assert!(session.store().win_pending());

    let mut output = Vec::new();
    run(&mut session, &b"wait 50\n"[..], &mut output).await.unwrap();
    assert!(session.store().is_won());
    assert!(String::from_utf8(output).unwrap().contains("Solved in 1 moves."));
}

#[test]
fn test_huge_drag_is_refused() {
    let mut session = Session::with_layout(Layout::Standard);
    text(session.handle_line("select square"));
    assert_eq!(text(session.handle_line("drag 1e12 0")), "Cannot drag there\n");
    assert_eq!(anchor(&session, "square"), Some(Position::new(4, 1)));
}

#[tokio::test(start_paused = true)]
async fn test_run_latches_win_while_idle() {
    let mut session = Session::with_layout(Layout::NearWin);
    let (mut client, server) = tokio::io::duplex(256);

    let driver = async {
        let mut output = Vec::new();
        run(&mut session, tokio::io::BufReader::new(server), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    };
    let player = async {
        use tokio::io::AsyncWriteExt;
        client.write_all(b"select L4\nup\n").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(600)).await;
        client.write_all(b"quit\n").await.unwrap();
    };

    let (output, ()) = tokio::join!(driver, player);
    assert!(output.contains("Solved in 1 moves."));
}
