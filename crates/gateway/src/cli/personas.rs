use tw_domain::config::Config;
use tw_personas::builtin_catalog;

use crate::bootstrap;

/// Fill the persona catalog. Safe to re-run: stored personas are skipped.
pub async fn warm(config: &Config) -> anyhow::Result<()> {
    let llm = bootstrap::build_registry(config)?;
    if llm.is_empty() {
        anyhow::bail!("no LLM provider configured; persona embeddings need one");
    }
    let store = bootstrap::build_persona_store(config, llm)?;
    let report = store.build_and_store(builtin_catalog()).await?;

    println!(
        "personas: {} added, {} already stored, {} failed ({})",
        report.added,
        report.skipped,
        report.failed,
        store.catalog().path().display(),
    );
    if report.failed > 0 {
        anyhow::bail!("{} persona(s) could not be embedded", report.failed);
    }
    Ok(())
}

/// Print the persona selected for `text`.
pub async fn show_match(config: &Config, text: &str) -> anyhow::Result<()> {
    let llm = bootstrap::build_registry(config)?;
    let store = bootstrap::build_persona_store(config, llm)?;
    let m = store.match_persona(text).await;

    match m.score {
        Some(score) => println!("{} ({}) score={score:.4}", m.persona, m.persona.key()),
        None => println!("{} ({}) [default]", m.persona, m.persona.key()),
    }
    Ok(())
}
