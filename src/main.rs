//! Console front end: two players share one terminal and enter long-form
//! moves (`Pe2-e4`, `Bf5xPe4`, `Ke1-g1`, `Pb7-b8=Q`) turn by turn.
//!
//! Besides moves, the prompt accepts `draw`, `accept`, `refuse`, `resign`
//! and `quit`.

use std::io::{self, BufRead, Write};

use quince_chess::board::piece::Color;
use quince_chess::board::render::render_board;
use quince_chess::game::play::{GamePlay, GameStatus};
use quince_chess::game::players::{NoStatistics, Player};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quince_chess=info".into()),
        )
        .init();

    let mut game = GamePlay::new("console");
    let mut statistics = NoStatistics;
    game.seat(Color::White, Player::new("white", "White"))
        .expect("white seat is free on a fresh game");
    game.seat(Color::Black, Player::new("black", "Black"))
        .expect("black seat is free on a fresh game");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}\n", render_board(game.board()));
        if game.status().is_terminal() {
            println!("game over: {}", game.status());
            println!("{}", game.scoresheet().transcript());
            return Ok(());
        }

        let mover = game.turn();
        print!("{mover} ({})> ", game.scoresheet().move_number());
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        let input = line.trim();
        let user = match mover {
            Color::White => "white",
            Color::Black => "black",
        };

        match input {
            "" => continue,
            "quit" => return Ok(()),
            "resign" => {
                if let Err(error) = game.resign(user, &mut statistics) {
                    println!("ERROR: {error}");
                }
            }
            "draw" => match game.offer_draw(user) {
                Ok(()) => println!("{mover} offers a draw"),
                Err(error) => println!("ERROR: {error}"),
            },
            // Draw responses belong to the offerer's opponent, who is the
            // player currently on the move.
            "accept" | "refuse" => {
                let accepted = input == "accept";
                match game.respond_to_draw(user, accepted, &mut statistics) {
                    Ok(()) => println!(
                        "draw offer {} by {mover}",
                        if accepted { "accepted" } else { "refused" }
                    ),
                    Err(error) => println!("ERROR: {error}"),
                }
            }
            _ => {
                let outcome = game.make_move(user, input, &mut statistics);
                println!("{}", outcome.message);
            }
        }
    }
}
