use crate::model::User;
use crate::model::cell::{Cell, CellStatus};
use crate::pipeline::stage5_stats::GroupStats;
use crate::report::{Includes, ReportContext, escape_html, format_f64_2, format_stat};

const DEFAULT_HEAD: &str = "<html>
<head>
<meta http-equiv=\"Content-type\" content=\"text/html; charset=UTF-8\">
<style>
tbody tr:nth-child(even) { background-color: #dddddd; }
tbody tr:nth-child(odd) { background-color: white; }
</style>
</head>
<body>
<script src=\"sorttable.js\"></script>
";

const DEFAULT_FOOT: &str = "</body>\n</html>\n";

pub fn render_report_html(ctx: &ReportContext<'_>, includes: &Includes) -> String {
    let mut out = String::new();

    out.push_str(includes.header.as_deref().unwrap_or(DEFAULT_HEAD));
    out.push_str("<h1>Rating</h1>\n");
    out.push_str("<table class=\"sortable\" border=\"1\">\n");
    out.push_str("<thead>\n<tr>\n");
    for cell in header_cells(ctx) {
        out.push_str(&cell);
        out.push('\n');
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for ranked in ctx.ranking {
        let user = &ctx.users[ranked.user];
        out.push_str("<tr>\n");
        out.push_str(&format!("<td>{}</td>", ranked.label));
        out.push_str(&user_cells(ctx, user));
        out.push_str("\n</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");

    render_statistics(&mut out, ctx);

    if let Some(notes) = &includes.notes {
        out.push_str(notes);
    }
    out.push_str("<hr/>\n");
    out.push_str(&format!(
        "<p><i>Generated {}</i></p>\n",
        escape_html(ctx.generated_at)
    ));
    out.push_str(includes.footer.as_deref().unwrap_or(DEFAULT_FOOT));
    out
}

fn header_cells(ctx: &ReportContext<'_>) -> Vec<String> {
    let flags = ctx.config.flags;
    let layout = ctx.layout;
    let mut cells = vec![
        "<th>N</th>".to_string(),
        "<th>Name</th>".to_string(),
        "<th>Group</th>".to_string(),
        "<th title=\"Total Score\">T. S.</th>".to_string(),
    ];
    if flags.show_percent {
        cells.push("<th>%</th>".to_string());
    }
    cells.push("<th title=\"Total Problems\">T. P.</th>".to_string());
    if flags.show_problems {
        for &p in &layout.columns {
            cells.push(th(&escape_html(&layout.problems[p].name)));
        }
    }
    if flags.show_accumulated {
        cells.push("<th>Accum</th>".to_string());
    }
    if flags.hide_summary {
        return cells;
    }
    if !flags.hide_grades {
        for bucket in &layout.buckets {
            cells.push(th(&format!(
                "{} ({})",
                escape_html(&bucket.name),
                bucket.table.top_mark()
            )));
        }
    }
    for cat in &layout.categories {
        let name = escape_html(&cat.name);
        cells.push(th(&format!("{} S ({})", name, cat.max_score)));
        cells.push(th(&format!("{} P ({})", name, cat.problem_count)));
    }
    if !flags.hide_marks {
        for bucket in &layout.buckets {
            let name = escape_html(&bucket.name);
            cells.push(th(&format!("{} S ({})", name, bucket.max_score)));
            cells.push(th(&format!("{} P ({})", name, bucket.problem_count)));
            if !flags.hide_grades {
                cells.push(th(&format!("{} M ({})", name, bucket.table.top_mark())));
            }
        }
    }
    cells
}

fn user_cells(ctx: &ReportContext<'_>, user: &User) -> String {
    let flags = ctx.config.flags;
    let mut out = String::new();
    out.push_str(&td(&escape_html(&user.name)));
    out.push_str(&td(&escape_html(&user.membership())));
    out.push_str(&td(&user.total_score.to_string()));
    if flags.show_percent {
        out.push_str(&td(&total_percent(user.total_score, ctx.layout.max_score)));
    }
    out.push_str(&td(&user.total_problems.to_string()));
    if flags.show_problems {
        for cell in &user.cells {
            out.push_str(&td(&problem_cell(cell)));
        }
    }
    if flags.show_accumulated {
        let accumulated = user.accumulated.unwrap_or(0);
        out.push_str(&td(&bold(&accumulated.to_string())));
    }
    if flags.hide_summary {
        return out;
    }
    if !flags.hide_grades {
        for mark in &user.mark_by_bucket {
            out.push_str(&td(&bold(&mark.to_string())));
        }
    }
    for (score, problems) in user
        .score_by_category
        .iter()
        .zip(user.problems_by_category.iter())
    {
        out.push_str(&td(&score.to_string()));
        out.push_str(&td(&problems.to_string()));
    }
    if !flags.hide_marks {
        for b in 0..ctx.layout.buckets.len() {
            out.push_str(&td(&format!(
                "{} ({}%)",
                user.score_by_bucket[b], user.percent_by_bucket[b]
            )));
            out.push_str(&td(&user.problems_by_bucket[b].to_string()));
            if !flags.hide_grades {
                out.push_str(&td(&bold(&user.mark_by_bucket[b].to_string())));
            }
        }
    }
    out
}

fn render_statistics(out: &mut String, ctx: &ReportContext<'_>) {
    out.push_str("<h2>Statistics</h2>\n");
    out.push_str("<table class=\"sortable\" border=\"1\">\n");
    out.push_str("<thead>\n<tr>");
    for name in [
        "Group",
        "Users",
        "Rank mean",
        "Rank median",
        "Rank &sigma;",
        "Score mean",
        "Score median",
        "Score &sigma;",
        "Problem mean",
        "Problem median",
        "Problem &sigma;",
    ] {
        out.push_str(&th(name));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for group in &ctx.stats.groups {
        out.push_str(&stats_row(group));
    }
    out.push_str("</tbody>\n<tfoot>\n");
    out.push_str(&stats_row(&ctx.stats.overall));
    out.push_str("</tfoot>\n</table>\n");
}

fn stats_row(stats: &GroupStats) -> String {
    let mut row = String::from("<tr>");
    row.push_str(&td(&escape_html(&stats.name)));
    row.push_str(&td(&stats.users().to_string()));
    for metric in [stats.rank(), stats.score(), stats.problem()] {
        row.push_str(&td(&format_stat(metric.mean)));
        row.push_str(&td(&format_f64_2(metric.median)));
        row.push_str(&td(&format_stat(metric.std_dev)));
    }
    row.push_str("</tr>\n");
    row
}

fn problem_cell(cell: &Cell) -> String {
    match cell.status {
        CellStatus::Empty => "&nbsp;".to_string(),
        CellStatus::Partial => cell.score.to_string(),
        CellStatus::Full => bold(&cell.score.to_string()),
    }
}

pub fn total_percent(score: i64, max_score: i64) -> String {
    if max_score <= 0 {
        return "N/A".to_string();
    }
    format!("{:.2}%", score as f64 * 100.0 / max_score as f64)
}

fn th(inner: &str) -> String {
    format!("<th>{inner}</th>")
}

fn td(inner: &str) -> String {
    format!("<td>{inner}</td>")
}

fn bold(inner: &str) -> String {
    format!("<b>{inner}</b>")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/html.rs"]
mod tests;
