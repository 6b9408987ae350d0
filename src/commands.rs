//! One handler per subcommand.
//!
//! Handlers build the command's configuration, run the library operation
//! and print the status lines. Errors are returned to [`crate::run`].

use crate::cli::{Cli, CountArgs, ExtractArgs, InfoArgs, MergeArgs, MergeDirArgs};
use crate::config::{MergeConfig, SplitConfig};
use crate::error::Result;
use crate::extract::extract_pages;
use crate::info::{count_pages, read_info};
use crate::merge::{MergeOutcome, merge_pdfs};
use crate::output::OutputFormatter;
use crate::split::{SplitOutcome, split_pdf};
use crate::utils::format_file_size;
use crate::{NAME, VERSION};

pub(crate) async fn merge(cli: &Cli, args: &MergeArgs, out: &OutputFormatter) -> Result<()> {
    let config = args.to_config(cli)?;
    run_merge(&config, out).await
}

pub(crate) async fn merge_dir(cli: &Cli, args: &MergeDirArgs, out: &OutputFormatter) -> Result<()> {
    let config = args.to_config(cli)?;
    out.info(&format!(
        "Found {} PDF files in {}",
        config.inputs.len(),
        args.directory.display()
    ));
    run_merge(&config, out).await
}

async fn run_merge(config: &MergeConfig, out: &OutputFormatter) -> Result<()> {
    out.info(&format!("Merging {} PDF files", config.inputs.len()));
    for (i, input) in config.inputs.iter().enumerate() {
        out.list_item(i + 1, &input.display().to_string());
    }

    let outcome = merge_pdfs(config).await?;
    report_merge(&outcome, out);
    Ok(())
}

fn report_merge(outcome: &MergeOutcome, out: &OutputFormatter) {
    let stats = &outcome.statistics;
    out.success(&format!(
        "Created {} ({} pages, {})",
        outcome.written.output_path.display(),
        stats.total_pages,
        outcome.written.format_file_size()
    ));
    if stats.bookmarks_added > 0 {
        out.info(&format!("Added {} bookmarks", stats.bookmarks_added));
    }
    out.debug(&format!(
        "Read {} of input, merged in {:.2?}, wrote in {:.2?}",
        stats.format_input_size(),
        stats.merge_time,
        outcome.written.write_time
    ));
}

pub(crate) async fn split(config: SplitConfig, out: &OutputFormatter) -> Result<()> {
    out.info(&format!("Splitting {}", config.input.display()));
    let outcome = split_pdf(&config).await?;
    report_split(&outcome, out);
    Ok(())
}

fn report_split(outcome: &SplitOutcome, out: &OutputFormatter) {
    for (i, output) in outcome.outputs.iter().enumerate() {
        out.list_item(
            i + 1,
            &format!(
                "{} ({}, {})",
                output.path.display(),
                output.chunk,
                format_file_size(output.file_size)
            ),
        );
    }
    out.success(&format!(
        "Created {} files from {} pages",
        outcome.outputs.len(),
        outcome.source_pages
    ));
}

pub(crate) async fn extract(cli: &Cli, args: &ExtractArgs, out: &OutputFormatter) -> Result<()> {
    let config = args.to_config(cli)?;
    let outcome = extract_pages(&config).await?;
    out.success(&format!(
        "Extracted {} of {} pages to {}",
        outcome.pages.len(),
        outcome.source_pages,
        outcome.output().display()
    ));
    Ok(())
}

pub(crate) async fn info(args: &InfoArgs, out: &OutputFormatter) -> Result<()> {
    let info = read_info(&args.input).await?;

    if args.json {
        // JSON is data, not status: printed even with --quiet.
        println!("{}", info.to_json()?);
        return Ok(());
    }

    out.info(&format!("{}", info.path.display()));
    out.detail("Size:", &info.format_file_size());
    out.detail("Pages:", &info.page_count.to_string());
    out.detail("Version:", &info.version);
    if let Some((width, height)) = info.page_size {
        out.detail("Page size:", &format!("{width:.0} x {height:.0} pt"));
    }
    if info.encrypted {
        out.warning("Document is encrypted");
    }
    for (label, value) in info.metadata.fields() {
        out.detail(&format!("{label}:"), value);
    }
    Ok(())
}

pub(crate) async fn count(args: &CountArgs) -> Result<()> {
    let pages = count_pages(&args.input).await?;
    let noun = if pages == 1 { "page" } else { "pages" };
    // The count is the result, so --quiet does not hide it.
    println!("{} has {pages} {noun}", args.input.display());
    Ok(())
}

pub(crate) fn version(out: &OutputFormatter) {
    out.plain(&format!("{NAME} v{VERSION}"));
    out.plain("Merge, split and extract pages from PDF files");
    out.plain(&format!("For help: {NAME} --help"));
}
