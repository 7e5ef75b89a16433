use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Category, Question, Store};

const CATEGORIES_FILE: &str = "categories.csv";
const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: &Path, data: &[impl Serialize]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(store: &Store, dir: &Path) -> anyhow::Result<()> {
    let categories = store.all_categories().await?;
    let questions = store.all_questions().await?;
    if !dir.exists() {
        std::fs::create_dir_all(dir)?
    }
    write_to(&dir.join(CATEGORIES_FILE), &categories)?;
    write_to(&dir.join(QUESTIONS_FILE), &questions)?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Exported trivia data to {}",
        dir.display()
    );
    Ok(())
}

/// Categories go in first so questions can reference them.
pub async fn import_data(store: &Store, dir: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;
    store.import_categories(&categories).await?;
    store.import_questions(&questions).await?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Imported trivia data from {}",
        dir.display()
    );
    Ok(())
}
