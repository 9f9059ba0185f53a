use crate::Result;
use crate::analysis::UserAnalysis;
use crate::config::Config;
use crate::misc::ColorMode;
use crate::registry::{ComparisonEntry, ComparisonRegistry};
use crate::scoring::{self, ScoredRepository, Signal, UserStats};
use chrono::{DateTime, Utc};
use core::fmt::{self, Write};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, stdout};
use strum::IntoEnumIterator;
use terminal_size::{Width, terminal_size};

const DEFAULT_TERMINAL_WIDTH: usize = 120;
const SEPARATOR_WIDTH: usize = 40;
const TABLE_INDENT: usize = 4;
const COLUMN_GAP: usize = 2;
const MIN_DESCRIPTION_WIDTH: usize = 20;
const SCORE_WIDTH: usize = 5;
const POINTS_WIDTH: usize = 6;

pub fn generate_user<W: Write>(analysis: &UserAnalysis, config: &Config, color: ColorMode, explain: bool, writer: &mut W) -> Result<()> {
    ConsoleReporter::new(writer, config, color).generate_user_report(analysis, explain)
}

pub fn generate_comparison<W: Write>(registry: &ComparisonRegistry, config: &Config, color: ColorMode, writer: &mut W) -> Result<()> {
    ConsoleReporter::new(writer, config, color).generate_comparison_report(registry)
}

/// Write the horizontal rule that goes between consecutive user reports
pub fn generate_separator<W: Write>(config: &Config, color: ColorMode, writer: &mut W) -> Result<()> {
    let colors = ColorScheme::new(config, color);
    writeln!(writer)?;
    colors.write_styled_line(writer, "═", SEPARATOR_WIDTH, TextStyle::Dimmed)?;
    writeln!(writer)?;
    writeln!(writer)?;
    Ok(())
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colors: ColorScheme<'a>,
    layout: Layout,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    fn new(writer: &'a mut W, config: &'a Config, color_mode: ColorMode) -> Self {
        Self {
            writer,
            colors: ColorScheme::new(config, color_mode),
            layout: Layout::new(),
        }
    }

    fn generate_user_report(&mut self, analysis: &UserAnalysis, explain: bool) -> Result<()> {
        self.write_user_header(analysis)?;

        if analysis.repositories.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "No public repositories.")?;
            return Ok(());
        }

        self.write_languages(&analysis.stats)?;
        self.write_repositories_table(&analysis.repositories)?;

        if explain {
            self.write_signals_table(analysis)?;
        }
        Ok(())
    }

    fn generate_comparison_report(&mut self, registry: &ComparisonRegistry) -> Result<()> {
        let entries: Vec<_> = registry.list().collect();
        if entries.is_empty() {
            return Ok(());
        }

        let table = ComparisonTable::new(&entries);

        writeln!(self.writer)?;
        self.colors.write_styled_text(self.writer, "User Comparison", TextStyle::Bold)?;
        writeln!(self.writer)?;
        self.write_comparison_header(&table)?;
        for entry in entries {
            self.write_comparison_row(entry, &table)?;
        }
        Ok(())
    }

    fn write_user_header(&mut self, analysis: &UserAnalysis) -> Result<()> {
        let profile = &analysis.profile;
        let stats = &analysis.stats;

        writeln!(self.writer, "User           : {}", profile.login)?;
        if let Some(name) = &profile.name {
            writeln!(self.writer, "Name           : {name}")?;
        }
        writeln!(self.writer, "Profile        : {}", profile.html_url)?;
        writeln!(self.writer, "Followers      : {}", profile.followers)?;
        writeln!(self.writer, "Public Repos   : {}", profile.public_repos)?;
        writeln!(self.writer, "Repositories   : {}", stats.total_repos)?;
        writeln!(self.writer, "Total Stars    : {}", stats.total_stars)?;
        writeln!(self.writer, "Total Forks    : {}", stats.total_forks)?;

        write!(self.writer, "Average Score  : ")?;
        self.colors.write_colorized_score(self.writer, stats.avg_quality_score, None)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_languages(&mut self, stats: &UserStats) -> Result<()> {
        if stats.languages.is_empty() {
            return Ok(());
        }

        writeln!(self.writer)?;
        self.colors.write_styled_text(self.writer, "Languages", TextStyle::Bold)?;
        writeln!(self.writer)?;

        let mut languages: Vec<_> = stats.languages.iter().collect();
        languages.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let width = languages.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, count) in languages {
            writeln!(self.writer, "  {name:<width$}: {count}")?;
        }
        Ok(())
    }

    fn write_repositories_table(&mut self, repos: &[ScoredRepository]) -> Result<()> {
        let table = Table::new(&self.layout, repos);

        self.write_table_header(&table)?;
        for scored in repos {
            self.write_repository_row(scored, &table)?;
        }
        Ok(())
    }

    fn write_table_header(&mut self, table: &Table) -> Result<()> {
        writeln!(self.writer)?;
        self.colors.write_styled_line(self.writer, "─", table.width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        write!(self.writer, "    ")?;
        self.colors.write_styled_text(self.writer, "Repository", TextStyle::Bold)?;
        write!(self.writer, "{:width$}  ", "", width = table.name_width - "Repository".len())?;
        self.colors.write_styled_text(self.writer, "Score", TextStyle::Bold)?;
        write!(self.writer, "  {:width$}", "", width = table.count_width - "Stars".len())?;
        self.colors.write_styled_text(self.writer, "Stars", TextStyle::Bold)?;
        write!(self.writer, "  {:width$}", "", width = table.count_width - "Forks".len())?;
        self.colors.write_styled_text(self.writer, "Forks", TextStyle::Bold)?;
        write!(self.writer, "  ")?;
        self.colors.write_styled_text(self.writer, "Language", TextStyle::Bold)?;
        write!(self.writer, "{:width$}  ", "", width = table.lang_width - "Language".len())?;
        self.colors.write_styled_text(self.writer, "Description", TextStyle::Bold)?;
        writeln!(self.writer)?;

        self.colors.write_styled_line(self.writer, "─", table.width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_repository_row(&mut self, scored: &ScoredRepository, table: &Table) -> Result<()> {
        let repo = &scored.repo;
        let language = repo.language.as_deref().unwrap_or("-");
        let description = truncate(repo.description.as_deref().unwrap_or("-"), table.max_description_width);

        write!(self.writer, "    {name:<width$}  ", name = repo.name, width = table.name_width)?;
        self.colors.write_colorized_score(self.writer, scored.quality_score, Some(SCORE_WIDTH))?;
        writeln!(
            self.writer,
            "  {stars:>cw$}  {forks:>cw$}  {language:<lw$}  {description}",
            stars = repo.stargazers_count,
            forks = repo.forks_count,
            cw = table.count_width,
            lw = table.lang_width,
        )?;
        Ok(())
    }

    fn write_signals_table(&mut self, analysis: &UserAnalysis) -> Result<()> {
        let width = TABLE_INDENT + self.layout.signal_width + COLUMN_GAP + POINTS_WIDTH;

        writeln!(self.writer)?;
        self.colors.write_styled_line(self.writer, "─", width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        write!(self.writer, "    ")?;
        self.colors.write_styled_text(self.writer, "Signal", TextStyle::Bold)?;
        write!(self.writer, "{:width$}  ", "", width = self.layout.signal_width - "Signal".len())?;
        self.colors.write_styled_text(self.writer, "Points", TextStyle::Bold)?;
        writeln!(self.writer)?;

        self.colors.write_styled_line(self.writer, "─", width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        let num_repos = analysis.repositories.len();
        for (index, scored) in analysis.repositories.iter().enumerate() {
            self.write_repository_score_row(scored)?;
            self.write_signal_rows(scored, analysis.analyzed_at)?;

            if index < num_repos - 1 {
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    fn write_repository_score_row(&mut self, scored: &ScoredRepository) -> Result<()> {
        write!(self.writer, "{} = ", scored.repo.name)?;
        self.colors.write_colorized_score(self.writer, scored.quality_score, None)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_signal_rows(&mut self, scored: &ScoredRepository, analyzed_at: DateTime<Utc>) -> Result<()> {
        for (signal, granted) in scoring::evaluate(&scored.repo, analyzed_at) {
            let signal_width = self.layout.signal_width;
            write!(self.writer, "    {label:<signal_width$}  ", label = signal.description())?;
            if granted {
                writeln!(self.writer, "{points:>POINTS_WIDTH$}", points = signal.points())?;
            } else {
                writeln!(self.writer, "{:>POINTS_WIDTH$}", "-")?;
            }
        }
        Ok(())
    }

    fn write_comparison_header(&mut self, table: &ComparisonTable) -> Result<()> {
        self.colors.write_styled_line(self.writer, "─", table.width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        write!(self.writer, "    ")?;
        self.colors.write_styled_text(self.writer, "User", TextStyle::Bold)?;
        write!(self.writer, "{:width$}  ", "", width = table.login_width - "User".len())?;
        self.colors.write_styled_text(self.writer, "Score", TextStyle::Bold)?;
        write!(self.writer, "  {:width$}", "", width = table.count_width - "Repos".len())?;
        self.colors.write_styled_text(self.writer, "Repos", TextStyle::Bold)?;
        write!(self.writer, "  {:width$}", "", width = table.count_width - "Stars".len())?;
        self.colors.write_styled_text(self.writer, "Stars", TextStyle::Bold)?;
        write!(self.writer, "  {:width$}", "", width = table.count_width - "Forks".len())?;
        self.colors.write_styled_text(self.writer, "Forks", TextStyle::Bold)?;
        write!(self.writer, "  ")?;
        self.colors.write_styled_text(self.writer, "Top Language", TextStyle::Bold)?;
        writeln!(self.writer)?;

        self.colors.write_styled_line(self.writer, "─", table.width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_comparison_row(&mut self, entry: &ComparisonEntry, table: &ComparisonTable) -> Result<()> {
        write!(self.writer, "    {login:<width$}  ", login = entry.login, width = table.login_width)?;
        self.colors.write_colorized_score(self.writer, entry.stats.avg_quality_score, Some(SCORE_WIDTH))?;
        writeln!(
            self.writer,
            "  {repos:>cw$}  {stars:>cw$}  {forks:>cw$}  {languages}",
            repos = entry.stats.total_repos,
            stars = entry.stats.total_stars,
            forks = entry.stats.total_forks,
            cw = table.count_width,
            languages = language_summary(&entry.stats),
        )?;
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum TextStyle {
    Bold,
    Dimmed,
}

struct ColorScheme<'a> {
    config: &'a Config,
    enabled: bool,
}

impl<'a> ColorScheme<'a> {
    fn new(config: &'a Config, color_mode: ColorMode) -> Self {
        let enabled = matches!(color_mode, ColorMode::Always) || (matches!(color_mode, ColorMode::Auto) && stdout().is_terminal());
        Self { config, enabled }
    }

    fn write_styled_text<W: Write>(&self, writer: &mut W, text: &str, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{text}");
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", text.bold()),
            TextStyle::Dimmed => write!(writer, "{}", text.dimmed()),
        }
    }

    fn write_styled_line<W: Write>(&self, writer: &mut W, ch: &str, width: usize, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{}", ch.repeat(width));
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", ch.repeat(width).bold()),
            TextStyle::Dimmed => write!(writer, "{}", ch.repeat(width).dimmed()),
        }
    }

    fn write_colorized_score<W: Write>(&self, writer: &mut W, score: u8, padding: Option<usize>) -> fmt::Result {
        if !self.enabled {
            return match padding {
                Some(width) => write!(writer, "{score:>width$}"),
                None => write!(writer, "{score}"),
            };
        }

        let index = self.config.color_index_for_score(f64::from(score));
        let color = self.config.colors_for_scoring_bands[index].0;
        match padding {
            Some(width) => write!(writer, "{}", format!("{score:>width$}").truecolor(color.red, color.green, color.blue)),
            None => write!(writer, "{}", score.truecolor(color.red, color.green, color.blue)),
        }
    }
}

struct Layout {
    terminal_width: usize,
    signal_width: usize,
}

impl Layout {
    fn new() -> Self {
        Self {
            terminal_width: detect_terminal_width(),
            signal_width: Signal::iter().map(|s| s.description().len()).max().unwrap_or(30),
        }
    }
}

struct Table {
    width: usize,
    name_width: usize,
    count_width: usize,
    lang_width: usize,
    max_description_width: usize,
}

impl Table {
    fn new(layout: &Layout, repos: &[ScoredRepository]) -> Self {
        let name_width = repos.iter().map(|s| s.repo.name.len()).max().unwrap_or(0).max("Repository".len());
        let count_width = repos
            .iter()
            .map(|s| digits(s.repo.stargazers_count).max(digits(s.repo.forks_count)))
            .max()
            .unwrap_or(0)
            .max("Stars".len());
        let lang_width = repos
            .iter()
            .map(|s| s.repo.language.as_deref().unwrap_or("-").len())
            .max()
            .unwrap_or(0)
            .max("Language".len());

        let fixed_width = TABLE_INDENT + name_width + COLUMN_GAP + SCORE_WIDTH + COLUMN_GAP + 2 * (count_width + COLUMN_GAP) + lang_width + COLUMN_GAP;
        let max_description_width = layout.terminal_width.saturating_sub(fixed_width).max(MIN_DESCRIPTION_WIDTH);

        let actual_width = repos
            .iter()
            .map(|s| truncate(s.repo.description.as_deref().unwrap_or("-"), max_description_width).len())
            .max()
            .unwrap_or(0)
            .max("Description".len());

        Self {
            width: fixed_width + actual_width,
            name_width,
            count_width,
            lang_width,
            max_description_width,
        }
    }
}

struct ComparisonTable {
    width: usize,
    login_width: usize,
    count_width: usize,
}

impl ComparisonTable {
    fn new(entries: &[&ComparisonEntry]) -> Self {
        let login_width = entries.iter().map(|e| e.login.len()).max().unwrap_or(0).max("User".len());
        let count_width = entries
            .iter()
            .map(|e| digits(e.stats.total_repos).max(digits(e.stats.total_stars)).max(digits(e.stats.total_forks)))
            .max()
            .unwrap_or(0)
            .max("Repos".len());

        let lang_width = entries
            .iter()
            .map(|e| language_summary(&e.stats).len())
            .max()
            .unwrap_or(0)
            .max("Top Language".len());

        Self {
            width: TABLE_INDENT + login_width + COLUMN_GAP + SCORE_WIDTH + COLUMN_GAP + 3 * (count_width + COLUMN_GAP) + lang_width,
            login_width,
            count_width,
        }
    }
}

/// The user's most common primary language, ties broken alphabetically
fn top_language(stats: &UserStats) -> Option<(&str, u64)> {
    stats
        .languages
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, count)| (name.as_str(), *count))
}

fn language_summary(stats: &UserStats) -> String {
    top_language(stats).map_or_else(|| "-".to_string(), |(name, count)| format!("{name} ({count})"))
}

fn digits(value: impl fmt::Display) -> usize {
    format!("{value}").len()
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.len() <= max_width {
        return text.to_string();
    }

    let mut result = String::new();
    for ch in text.chars() {
        if result.len() + 1 >= max_width {
            break;
        }
        result.push(ch);
    }

    format!("{result}…")
}

fn detect_terminal_width() -> usize {
    if stdout().is_terminal() {
        terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(Width(w), _)| usize::from(w))
    } else {
        DEFAULT_TERMINAL_WIDTH
    }
}
