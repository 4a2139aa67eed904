//! Output formatting for search results and link listings

use crate::catalog::{CatalogStats, Hit, Link};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print search hits, one per line: score, name, uri
pub fn print_hits(hits: &[Hit<'_>], color: bool) -> io::Result<()> {
    write_hits(&mut stdout(color), hits)
}

pub fn write_hits<W: WriteColor>(out: &mut W, hits: &[Hit<'_>]) -> io::Result<()> {
    let width = hits
        .iter()
        .map(|h| h.score.to_string().len())
        .max()
        .unwrap_or(0);

    for hit in hits {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:>width$}", hit.score, width = width)?;
        out.reset()?;
        write!(out, "  ")?;
        write_link(out, hit.link)?;
    }

    Ok(())
}

/// Print every link in catalog order
pub fn print_links(links: &[Link], color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    for link in links {
        write_link(&mut out, link)?;
    }
    Ok(())
}

fn write_link<W: WriteColor>(out: &mut W, link: &Link) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}", link.name)?;
    out.reset()?;

    write!(out, "  ")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "{}", link.uri)?;
    out.reset()?;

    if !link.tags.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "  [{}]", link.tags.join(", "))?;
        out.reset()?;
    }

    writeln!(out)
}

/// Print catalog statistics
pub fn print_stats(stats: &CatalogStats) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "Links:            {}", stats.link_count)?;
    writeln!(out, "Suffix entries:   {}", stats.index.entry_count)?;
    writeln!(out, "Indexed links:    {}", stats.index.value_count)?;
    writeln!(out, "Total weight:     {}", stats.index.total_weight)?;
    writeln!(out, "Longest suffix:   {} bytes", stats.index.max_suffix_len)?;
    Ok(())
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    #[test]
    fn test_write_hits_aligns_scores() {
        let github = Link::new("GitHub", "https://github.com").with_tags(["code"]);
        let gitlab = Link::new("GitLab", "https://gitlab.com");
        let hits = vec![
            Hit { link: &github, score: 12 },
            Hit { link: &gitlab, score: 3 },
        ];

        let mut out = NoColor::new(Vec::new());
        write_hits(&mut out, &hits).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert_eq!(
            text,
            "12  GitHub  https://github.com  [code]\n 3  GitLab  https://gitlab.com\n"
        );
    }

    #[test]
    fn test_write_hits_empty() {
        let mut out = NoColor::new(Vec::new());
        write_hits(&mut out, &[]).unwrap();
        assert!(out.into_inner().is_empty());
    }
}
