//! Terminal rendering of the table state.
//!
//! Pure string builders so the session loop can print them and tests can
//! assert on them. The dealer's hole card never reaches the client until
//! the stand, so the render marks it as face-down while the player still
//! has a decision to make.

use bj_core::protocol::messages::ResultCode;
use bj_core::session::RoundMirror;

/// Multi-line snapshot of both hands.
pub fn render(table: &RoundMirror) -> String {
    let player: Vec<String> = table.player_cards().iter().map(|c| c.to_string()).collect();
    let dealer: Vec<String> = table.dealer_cards().iter().map(|c| c.to_string()).collect();

    let dealer_line = if table.is_over() {
        format!("Dealer: {} ({})", dealer.join(" "), table.dealer_sum())
    } else {
        format!("Dealer: {} [?]", dealer.join(" "))
    };

    format!(
        "{dealer_line}\nYou:    {} ({})",
        player.join(" "),
        table.player_sum()
    )
}

/// One-line banner for a finished round.
pub fn result_banner(result: ResultCode) -> &'static str {
    match result {
        ResultCode::Win => "You win!",
        ResultCode::Loss => "Dealer wins.",
        ResultCode::Tie => "Push.",
        ResultCode::NotOver => "Round still in play.",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
