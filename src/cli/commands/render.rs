//! Human-readable output
//!
//! All rounding happens here: the models carry full precision and every
//! figure is rounded only as it is printed.

use crate::app::models::{
    BatchRecord, BatchSummary, CalculationResult, CostCategory, Handler, HandlerPerformance,
    Insight, InsightTopic, Rating, Shed,
};
use crate::app::services::metrics::round_to;
use crate::app::services::ranking::with_ranks;
use colored::*;

pub fn category_label(category: CostCategory) -> &'static str {
    match category {
        CostCategory::Chicks => "Chicks",
        CostCategory::PreStarterFeed => "Pre-starter feed",
        CostCategory::StarterFeed => "Starter feed",
        CostCategory::GrowthFeed => "Growth feed",
        CostCategory::FinalFeed => "Final feed",
        CostCategory::Medicine => "Medicine",
        CostCategory::Miscellaneous => "Miscellaneous",
        CostCategory::Variations => "Cost variations",
        CostCategory::SawdustBedding => "Sawdust bedding",
    }
}

fn rating_label(rating: Rating) -> ColoredString {
    match rating {
        Rating::Excellent => "EXCELLENT".bright_green().bold(),
        Rating::Good => "GOOD".green(),
        Rating::Fair => "FAIR".yellow(),
        Rating::Poor => "POOR".bright_red().bold(),
        Rating::Info => "INFO".bright_blue(),
        Rating::Warning => "WARNING".bright_yellow().bold(),
    }
}

/// English sentence for one insight
pub fn insight_message(insight: &Insight) -> String {
    let value = insight.value;
    let share = round_to(insight.share_percent.unwrap_or(0.0), 1);
    match insight.topic {
        InsightTopic::FeedConversion => {
            format!("Feed conversion ratio of {}", round_to(value, 2))
        }
        InsightTopic::Mortality => format!("Mortality of {}%", round_to(value, 1)),
        InsightTopic::DailyGain => {
            format!("Daily weight gain of {} kg per bird", round_to(value, 3))
        }
        InsightTopic::CostEfficiency => {
            format!("Net cost of {} per kg produced", round_to(value, 2))
        }
        InsightTopic::MissingChicks => format!(
            "{} surviving chicks are not accounted for by any removal ({}% of the flock)",
            value, share
        ),
        InsightTopic::SurplusRemovals => format!(
            "{} more chicks were removed than survived ({}% of the flock); check the counts",
            value, share
        ),
        InsightTopic::EarlyHarvest => format!(
            "Early harvest at a weighted age of {} days",
            round_to(value, 1)
        ),
        InsightTopic::ExtendedCycle => format!(
            "Extended cycle at a weighted age of {} days",
            round_to(value, 1)
        ),
    }
}

fn field(label: &str, value: impl ToString) {
    println!(
        "  {} {}",
        format!("{:<28}", label).bright_cyan(),
        value.to_string().bright_white()
    );
}

pub fn print_result(result: &CalculationResult) {
    println!(
        "\n{} {}",
        "Batch".bright_green().bold(),
        result.batch_id.bright_white().bold()
    );

    println!("\n{}", "Flock".bright_green().bold());
    field("Surviving chicks:", result.surviving_chicks);
    field("Removed chicks:", result.removed_chicks);
    field("Missing chicks:", result.missing_chicks);
    field("Mortality (%):", round_to(result.mortality_rate_percent, 1));
    field("Viability (%):", round_to(result.viability_rate_percent, 1));

    println!("\n{}", "Production".bright_green().bold());
    field("Total weight (kg):", round_to(result.total_weight_produced_kg, 2));
    field("Total feed (kg):", round_to(result.total_feed_consumed_kg, 2));
    field("Average weight (kg):", round_to(result.average_weight_per_chick_kg, 3));
    field("Feed conversion ratio:", round_to(result.feed_conversion_ratio, 2));
    field("Weighted average age (days):", round_to(result.weighted_average_age, 1));
    field("Daily weight gain (kg):", round_to(result.daily_weight_gain_kg, 3));

    println!("\n{}", "Costs".bright_green().bold());
    for line in result.cost_breakdown.rendered() {
        println!(
            "  {} {:>12.2} {}",
            format!("{:<28}", category_label(line.category)).bright_cyan(),
            line.amount,
            format!("({:.1}%)", line.percent).bright_black()
        );
    }
    field("Total cost:", format!("{:.2}", result.total_cost));
    field("Bedding revenue:", format!("{:.2}", result.total_revenue));
    println!(
        "  {} {}",
        format!("{:<28}", "Net cost per kg:").bright_cyan(),
        format!("{:.2}", result.net_cost_per_kg).bright_white().bold()
    );

    if !result.insights.is_empty() {
        println!("\n{}", "Insights".bright_green().bold());
        for insight in &result.insights {
            println!("  [{}] {}", rating_label(insight.rating), insight_message(insight));
        }
    }
}

pub fn print_record(record: &BatchRecord, result: &CalculationResult) {
    print_result(result);
    println!("\n{}", "Record".bright_green().bold());
    field("Id:", record.id);
    field("Shed:", &record.input.shed_number);
    field("Handler:", &record.input.handler_name);
    field("Created:", record.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if let Some(updated_at) = record.updated_at {
        field("Updated:", updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

pub fn print_summaries(summaries: &[BatchSummary]) {
    if summaries.is_empty() {
        println!("{}", "No batches recorded".bright_yellow());
        return;
    }

    println!(
        "{}",
        format!(
            "{:<14} {:<8} {:<16} {:<10} {:>8} {:>7} {:>9} {:>9}",
            "Batch", "Shed", "Handler", "Created", "Chicks", "FCR", "Mort. %", "Cost/kg"
        )
        .bright_green()
        .bold()
    );
    for row in summaries {
        println!(
            "{:<14} {:<8} {:<16} {:<10} {:>8} {:>7.2} {:>9.1} {:>9.2}",
            row.batch_id,
            row.shed_number,
            row.handler_name,
            row.created_at.format("%Y-%m-%d"),
            row.initial_chicks,
            row.fcr,
            row.mortality_percent,
            row.cost_per_kg
        );
    }
}

pub fn print_leaderboard(ranked: &[HandlerPerformance]) {
    if ranked.is_empty() {
        println!("{}", "No batches recorded".bright_yellow());
        return;
    }

    println!(
        "{}",
        format!(
            "{:>4}  {:<16} {:>7} {:>7} {:>8} {:>9} {:>9} {:>7}",
            "Rank", "Handler", "Batches", "FCR", "Mort. %", "Gain (kg)", "Cost/kg", "Score"
        )
        .bright_green()
        .bold()
    );
    for (rank, performance) in with_ranks(ranked) {
        println!(
            "{:>4}  {:<16} {:>7} {:>7.2} {:>8.1} {:>9.3} {:>9.2} {:>7}",
            rank.to_string().bright_yellow().bold(),
            performance.handler_name,
            performance.total_batches,
            performance.avg_feed_conversion_ratio,
            performance.avg_mortality_rate,
            performance.avg_daily_weight_gain,
            performance.avg_cost_per_kg,
            format!("{:.1}", performance.performance_score).bright_white().bold()
        );
    }
    println!(
        "\n{}",
        format!("Scoring policy {}", ranked[0].scoring_policy).bright_black()
    );
}

pub fn print_performance(performance: &HandlerPerformance) {
    println!(
        "\n{} {}",
        "Handler".bright_green().bold(),
        performance.handler_name.bright_white().bold()
    );
    field("Batches:", performance.total_batches);
    field("Chicks processed:", performance.total_chicks_processed);
    field("Average FCR:", round_to(performance.avg_feed_conversion_ratio, 2));
    field("Average mortality (%):", round_to(performance.avg_mortality_rate, 1));
    field("Average daily gain (kg):", round_to(performance.avg_daily_weight_gain, 3));
    field("Average cost per kg:", round_to(performance.avg_cost_per_kg, 2));
    field(
        "Performance score:",
        format!(
            "{} (policy {})",
            round_to(performance.performance_score, 1),
            performance.scoring_policy
        ),
    );
}

fn print_optional(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        field(label, value);
    }
}

pub fn print_handler(handler: &Handler) {
    println!(
        "\n{} {}",
        "Handler".bright_green().bold(),
        handler.name.bright_white().bold()
    );
    print_optional("Email:", handler.email.as_deref());
    print_optional("Phone:", handler.phone.as_deref());
    print_optional("Notes:", handler.notes.as_deref());
    field("Registered:", handler.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if let Some(updated_at) = handler.updated_at {
        field("Updated:", updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

pub fn print_shed(shed: &Shed) {
    println!(
        "\n{} {}",
        "Shed".bright_green().bold(),
        shed.number.bright_white().bold()
    );
    field("Status:", shed.status);
    if let Some(capacity) = shed.capacity {
        field("Capacity (birds):", capacity);
    }
    print_optional("Location:", shed.location.as_deref());
    print_optional("Notes:", shed.notes.as_deref());
    field("Registered:", shed.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if let Some(updated_at) = shed.updated_at {
        field("Updated:", updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

pub fn print_names(title: &str, names: &[String]) {
    if names.is_empty() {
        println!("{}", "Nothing recorded".bright_yellow());
        return;
    }
    println!("{}", title.bright_green().bold());
    for name in names {
        println!("  {}", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_messages_round_for_display() {
        let fcr = Insight {
            topic: InsightTopic::FeedConversion,
            rating: Rating::Good,
            value: 1.723456,
            share_percent: None,
        };
        assert_eq!(insight_message(&fcr), "Feed conversion ratio of 1.72");

        let gain = Insight {
            topic: InsightTopic::DailyGain,
            rating: Rating::Good,
            value: 0.0587,
            share_percent: None,
        };
        assert_eq!(insight_message(&gain), "Daily weight gain of 0.059 kg per bird");
    }

    #[test]
    fn test_head_count_insights_mention_share() {
        let missing = Insight {
            topic: InsightTopic::MissingChicks,
            rating: Rating::Warning,
            value: 400.0,
            share_percent: Some(8.0),
        };
        assert_eq!(
            insight_message(&missing),
            "400 surviving chicks are not accounted for by any removal (8% of the flock)"
        );
    }

    #[test]
    fn test_every_category_has_a_label() {
        for category in CostCategory::ALL {
            assert!(!category_label(category).is_empty());
        }
    }
}
