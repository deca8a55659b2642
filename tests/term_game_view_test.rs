use blockfall::core::GameState;
use blockfall::term::{AnchorY, FrameBuffer, GameView, Rgb, Viewport};
use blockfall::types::{Phase, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_draws_open_topped_well() {
    let snap = GameState::new(1).snapshot();
    // Two columns per cell: 10*2 + 2 walls wide, 20 + floor tall.
    let fb = GameView::default().render(&snap, None, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '║');
    assert_eq!(fb.get(21, 0).unwrap().ch, '║');
    assert_eq!(fb.get(0, 21).unwrap().ch, '╚');
    assert_eq!(fb.get(21, 21).unwrap().ch, '╝');
    assert_eq!(fb.get(10, 21).unwrap().ch, '═');
}

#[test]
fn term_view_renders_locked_cell_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = PieceKind::L.code();
    snap.active = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, None, Viewport::new(22, 22));

    for x in [1, 2] {
        let g = fb.get(x, 20).unwrap();
        assert_eq!(g.ch, '█');
        assert_eq!(g.style.fg, Rgb::of_piece(PieceKind::L));
    }
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let mut state = GameState::new(1);
    state.apply_command("softDrop");
    let snap = state.snapshot();
    let active = snap.active.unwrap();
    let fb = GameView::default().render(&snap, None, Viewport::new(22, 22));

    for (x, y) in active.minos {
        if y >= 0 {
            let g = fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap();
            assert_eq!(g.ch, '█');
            assert!(g.style.bold);
        }
    }
    for (x, y) in active.ghost_minos(snap.ghost_y.unwrap()) {
        assert_eq!(fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap().ch, '░');
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;
    snap.hold = Some(PieceKind::T);

    let text = screen_text(&GameView::default().render(&snap, None, Viewport::new(60, 24)));
    for needle in ["SCORE", "1234", "LEVEL", "LINES", "HOLD", "NEXT"] {
        assert!(text.contains(needle), "missing {}", needle);
    }

    let narrow = screen_text(&GameView::default().render(&snap, None, Viewport::new(22, 22)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_dims_spent_hold() {
    let mut state = GameState::new(1);
    assert!(state.hold());
    let snap = state.snapshot();
    assert!(!snap.can_hold);

    let fb = GameView::default().render(&snap, None, Viewport::new(60, 24));
    let dimmed = fb
        .glyphs()
        .iter()
        .filter(|g| g.ch == '█' && g.style.dim)
        .count();
    assert_eq!(dimmed, 8);
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let mut snap = GameState::new(1).snapshot();
    snap.phase = Phase::Paused;
    snap.paused = true;
    let text = screen_text(&GameView::default().render(&snap, None, Viewport::new(22, 22)));
    assert!(text.contains("PAUSED"));

    snap.phase = Phase::GameOver;
    snap.paused = false;
    snap.game_over = true;
    let fb = GameView::default().render(&snap, Some("DOUBLE"), Viewport::new(22, 22));
    assert!(fb.row_text(11).contains("GAME OVER"));
    // Overlays win over banners.
    assert!(!screen_text(&fb).contains("DOUBLE"));
}

#[test]
fn term_view_shows_banner() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Some("TETRIS"), Viewport::new(22, 22));
    assert!(fb.row_text(7).contains("TETRIS"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, None, Viewport::new(22, 30));

    // top = (30 - 22) / 2 = 4, so the floor sits at row 25.
    assert_eq!(fb.get(0, 25).unwrap().ch, '╚');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, None, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 21).unwrap().ch, '╚');
}
