//! moderation-dataset: convert and analyze moderation fine-tuning datasets

use anyhow::Result;

fn main() -> Result<()> {
    moderation_dataset::cli::run()
}
