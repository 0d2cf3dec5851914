use anyhow::Result;
use console::{Term, style};
use serde::Serialize;

use crate::commands::backup::Exported;
use crate::commands::status::StatusReport;
use crate::models::{CHAR_LIMIT, Post, Reply};
use crate::sync::{LoadSource, NetworkStatus, SaveReport};
use crate::timeline::{Saved, Timeline};

const WRAP_WIDTH: usize = 72;

pub struct Output {
    term: Term,
    json: bool,
    expand_all: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self {
            term: Term::stdout(),
            json,
            expand_all: false,
        }
    }

    pub fn with_expanded(json: bool, expand_all: bool) -> Self {
        Self {
            term: Term::stdout(),
            json,
            expand_all,
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let output = serde_json::to_string_pretty(value)?;
        self.term.write_line(&output)?;
        Ok(())
    }

    fn write_wrapped(&self, text: &str, indent: &str) -> Result<()> {
        let options = textwrap::Options::new(WRAP_WIDTH)
            .initial_indent(indent)
            .subsequent_indent(indent);
        for line in textwrap::wrap(text, options) {
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    /// Non-fatal save problems, one friendly line each.
    fn save_warnings(&self, report: &SaveReport) -> Result<()> {
        for message in report.messages() {
            self.term
                .write_line(&format!("{} {message}", style("Warning:").yellow().bold()))?;
        }
        Ok(())
    }

    fn print_post_header(&self, post: &Post) -> Result<()> {
        self.term.write_line(&format!(
            "{} {} {} · {}  {}",
            post.avatar,
            style(&post.author_name).bold(),
            style(&post.author_handle).dim(),
            style(&post.created_label).dim(),
            style(post.id).cyan()
        ))?;
        Ok(())
    }

    fn print_reply(&self, reply: &Reply) -> Result<()> {
        self.term.write_line(&format!(
            "    {} {} {} · {}",
            reply.avatar,
            style(&reply.author_name).bold(),
            style(&reply.author_handle).dim(),
            style(&reply.created_label).dim()
        ))?;
        self.write_wrapped(&reply.content, "      ")
    }

    fn print_post(&self, post: &Post, expanded: bool) -> Result<()> {
        self.print_post_header(post)?;
        self.write_wrapped(&post.content, "  ")?;

        let remaining = post.remaining_chars();
        if remaining < 0 {
            self.term.write_line(&format!(
                "  {}",
                style(format!("{} characters over {CHAR_LIMIT}", -remaining)).red()
            ))?;
        }

        if post.replies.is_empty() {
            self.term
                .write_line(&format!("  {}", style("0 replies").dim()))?;
        } else if expanded {
            self.term.write_line(&format!(
                "  {}",
                style(format!("{} replies", post.replies.len())).dim()
            ))?;
            for reply in &post.replies {
                self.print_reply(reply)?;
            }
        } else {
            self.term.write_line(&format!(
                "  {}",
                style(format!(
                    "{} replies (chirp show {} to expand)",
                    post.replies.len(),
                    post.id
                ))
                .dim()
            ))?;
        }
        Ok(())
    }

    pub fn post_created(&self, saved: &Saved<Post>) -> Result<()> {
        if self.json {
            return self.print_json(&saved.item);
        }

        self.term.write_line(&format!(
            "{} {}",
            style("Posted:").green(),
            style(saved.item.id).cyan().bold()
        ))?;
        self.write_wrapped(&saved.item.content, "  ")?;
        self.save_warnings(&saved.report)
    }

    /// Confirms the reply and prints the whole thread, now expanded.
    pub fn reply_created(&self, saved: &Saved<Reply>, timeline: &Timeline, post_id: i64) -> Result<()> {
        if self.json {
            return self.print_json(&saved.item);
        }

        self.term.write_line(&format!(
            "{} {}",
            style("Replied to post:").green(),
            style(post_id).cyan().bold()
        ))?;
        self.term.write_line("")?;
        if let Some(post) = timeline.get(post_id) {
            self.print_post(post, timeline.is_expanded(post_id))?;
        }
        self.save_warnings(&saved.report)
    }

    pub fn timeline(&self, timeline: &Timeline) -> Result<()> {
        if self.json {
            return self.print_json(timeline.posts());
        }

        if timeline.posts().is_empty() {
            self.term.write_line("No posts yet.")?;
            self.term
                .write_line(&format!("  {}", style("Post the first one with: chirp post \"...\"").dim()))?;
            return Ok(());
        }

        for post in timeline.posts() {
            self.print_post(post, self.expand_all || timeline.is_expanded(post.id))?;
            self.term.write_line("")?;
        }
        Ok(())
    }

    pub fn post_detail(&self, post: &Post) -> Result<()> {
        if self.json {
            return self.print_json(post);
        }
        self.print_post(post, self.expand_all)
    }

    pub fn refreshed(&self, source: LoadSource, count: usize) -> Result<()> {
        let label = match source {
            LoadSource::Remote => "Loaded from remote",
            LoadSource::Local => "Remote unavailable, loaded from local storage",
            LoadSource::Offline => "Offline, loaded from local storage",
            LoadSource::Seed => "Nothing stored yet, loaded sample posts",
        };
        self.term.write_line(&format!(
            "{} ({} posts)",
            style(label).green(),
            style(count).bold()
        ))?;
        Ok(())
    }

    pub fn exported(&self, exported: &Exported) -> Result<()> {
        self.term.write_line(&format!(
            "{} {} ({} posts)",
            style("Exported to").green(),
            style(exported.path.display()).cyan(),
            exported.post_count
        ))?;
        Ok(())
    }

    pub fn imported(&self, report: &SaveReport, count: usize) -> Result<()> {
        self.term.write_line(&format!(
            "{} {} posts",
            style("Imported").green(),
            style(count).bold()
        ))?;
        self.save_warnings(report)
    }

    pub fn cleared(&self, report: &SaveReport) -> Result<()> {
        self.term
            .write_line(&style("Cleared all posts").green().to_string())?;
        self.save_warnings(report)
    }

    pub fn clear_cancelled(&self) -> Result<()> {
        self.term.write_line("Nothing deleted.")?;
        Ok(())
    }

    pub fn network(&self, status: NetworkStatus) -> Result<()> {
        let label = match status {
            NetworkStatus::Online => style(status.as_ref()).green(),
            NetworkStatus::Offline => style(status.as_ref()).red(),
        };
        self.term.write_line(&format!("Network: {label}"))?;
        Ok(())
    }

    pub fn status(&self, report: &StatusReport) -> Result<()> {
        if self.json {
            return self.print_json(report);
        }

        self.network(report.network)?;
        let remote = if report.remote_configured {
            style("configured").green()
        } else {
            style("not configured").dim()
        };
        self.term.write_line(&format!("Remote: {remote}"))?;
        self.term.write_line(&format!(
            "Loaded from: {}",
            style(report.loaded_from.as_ref()).yellow()
        ))?;
        self.term.write_line(&format!(
            "Posts: {} ({} replies)",
            report.posts, report.replies
        ))?;
        self.term
            .write_line(&format!("Local file: {}", report.local_path.display()))?;
        Ok(())
    }
}
