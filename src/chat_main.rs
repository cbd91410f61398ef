//! Line-oriented chat front end over the same pipeline the server uses.

use std::io::{self, BufRead, Write};

use focus_assist::history::{ConversationTurn, TurnLog};
use focus_assist::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let state = AppState::initialize().await?;

    println!(
        "น้องโฟกัสพร้อมให้บริการแล้วครับ (โมเดล: {}) พิมพ์ exit เพื่อจบการสนทนา",
        state.generation_model
    );

    let stdin = io::stdin();
    let mut log = TurnLog::new();

    loop {
        print!("\nลูกค้า: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = state.pipeline.respond(question, &log).await;
        println!("\nน้องโฟกัส:\n{}", reply);

        log.push(ConversationTurn::user(question));
        log.push(ConversationTurn::assistant(reply));
    }

    println!("ปิดโปรแกรม ขอบคุณที่ใช้บริการครับ");
    Ok(())
}
