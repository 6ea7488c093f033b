//! # objalg-cli
//!
//! A guided tour of the bundled algebra families. Every command merges a
//! data algebra with independently written behavior algebras, builds a few
//! values through the merged family and shows what each value can do.
//!
//! ```text
//! Lit(1), Add(l, r)           ← data algebra
//!   + print, evaluate         ← behavior algebras, merged
//!   = Add(Lit(1), Lit(2)) with .print() and .evaluate()
//! ```

use clap::{Parser, Subcommand};
use colored::*;
use objalg_families::{
    boolean_family, color_family, expr_family, list_family, mul_data, mul_evaluate, mul_print,
    peano_family, point_family, var_family, Scope, DEFAULT_SEPARATOR, NAMED_COLORS,
};
use objalg_merge::{
    merge_with_config, Algebra, AlgebraError, AlgebraInstance, ConstructionContext, MergeConfig,
    Result, Value,
};
use std::sync::Arc;

// ─── CLI ───────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "objalg-cli")]
#[command(about = "Merge object algebras and watch the results gain capabilities")]
#[command(version)]
struct Cli {
    /// Log merges, instance construction and per-operation folds
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Booleans: truth tables for and, or, not
    Bool,
    /// Peano numerals: build n, then add it to itself
    Peano {
        n: u32,
    },
    /// Expressions: print and evaluate, then extend the family with Mul
    Expr,
    /// Variables: assignment and lookup through a shared scope
    Vars,
    /// Points: add 2D and 3D points
    Point,
    /// Colors: render a named color or an `r,g,b` triple
    Color {
        name: String,
    },
    /// Lists: build, concatenate and print with a custom separator
    List {
        #[arg(long, default_value = DEFAULT_SEPARATOR)]
        separator: String,
        /// Items of the first list (the second is always 7, 8, 9)
        #[arg(default_values_t = [1, 2, 3])]
        items: Vec<i64>,
    },
    /// Run every tour
    All,
}

// ─── Pretty printing ──────────────────────────────────────────────────────

fn header(text: &str) {
    let bar = "═".repeat(60);
    println!("\n{}", bar.bright_cyan());
    println!("  {}", text.bold().bright_white());
    println!("{}", bar.bright_cyan());
}

fn section(text: &str) {
    println!("\n{} {}", "▸".bright_yellow(), text.bold());
}

fn step(text: &str) {
    println!("  {} {}", "•".bright_green(), text);
}

fn outcome(call: &str, result: &Value) {
    println!(
        "  {} {} {}",
        call.bright_white(),
        "→".bright_cyan(),
        show(result).bright_green()
    );
}

fn show(value: &Value) -> String {
    match value {
        Value::Text(s) => format!("{:?}", s),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => {
            let items: Vec<_> = items.iter().map(show).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Record(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Func(_) => "<capability>".to_string(),
        Value::Unit => "()".to_string(),
    }
}

/// Print a result's capabilities and its data fields as JSON.
fn show_result(label: &str, value: &Value) -> Result<()> {
    let record = value.as_record()?;
    let caps: Vec<_> = record.capability_names().collect();
    let border = "─".repeat(44);
    println!("  ┌{}┐", border);
    println!("  │ {:<42} │", label.bright_yellow().to_string());
    println!("  ├{}┤", border);
    println!("  │ {:<42} │", format!("capabilities: {}", caps.join(", ")));
    println!("  │ {:<42} │", format!("data: {}", show(value)));
    println!("  └{}┘", border);
    Ok(())
}

fn show_family(instance: &AlgebraInstance) {
    step(&format!(
        "{} exposes {}",
        instance.name().bright_magenta(),
        instance.operation_names().join(", ")
    ));
}

fn call0(value: &Value, capability: &str) -> Result<Value> {
    value.call(capability, &[])
}

fn instantiate<A: Algebra + 'static>(algebra: Arc<A>) -> Result<AlgebraInstance> {
    AlgebraInstance::new(algebra, &ConstructionContext::new())
}

// ─── Tours ─────────────────────────────────────────────────────────────────

fn run_bool() -> Result<()> {
    header("BOOLEANS — five algebras, one family");

    let b = instantiate(boolean_family()?)?;
    show_family(&b);

    section("Truth tables");
    for (l, r) in [("True", "True"), ("True", "False"), ("False", "True"), ("False", "False")] {
        let left = b.call(l, &[])?;
        let right = b.call(r, &[])?;
        for op in ["and", "or"] {
            let result = left.call(op, &[right.clone()])?;
            outcome(&format!("{}().{}({}())", l, op, r), &call0(&result, "print")?);
        }
    }
    for case in ["True", "False"] {
        let result = b.call(case, &[])?.call("not", &[])?;
        outcome(&format!("{}().not()", case), &call0(&result, "print")?);
    }

    section("Every result carries every capability");
    show_result("True().not()", &b.call("True", &[])?.call("not", &[])?)
}

fn peano(n: &AlgebraInstance, k: u32) -> Result<Value> {
    (0..k).try_fold(n.call("Zero", &[])?, |pred, _| n.call("Succ", &[pred]))
}

fn run_peano(k: u32) -> Result<()> {
    header("PEANO — numerals built from Zero and Succ");

    let n = instantiate(peano_family()?)?;
    show_family(&n);

    section(&format!("Build {}", k));
    let value = peano(&n, k)?;
    outcome(
        &format!("{}Zero(){}.toNumber()", "Succ(".repeat(k as usize), ")".repeat(k as usize)),
        &call0(&value, "toNumber")?,
    );

    section("Add it to itself");
    let sum = value.call("add", &[value.clone()])?;
    outcome("n.add(n).toNumber()", &call0(&sum, "toNumber")?);
    step("add rebuilds through the merged Succ, so the sum still has toNumber");
    Ok(())
}

fn run_expr(instrument: bool) -> Result<()> {
    header("EXPRESSIONS — extending data and behavior independently");

    let e = instantiate(expr_family()?)?;
    show_family(&e);

    section("Lit and Add");
    let sum = e.call("Add", &[e.call("Lit", &[1.into()])?, e.call("Lit", &[2.into()])?])?;
    outcome("Add(Lit(1), Lit(2)).print()", &call0(&sum, "print")?);
    outcome("Add(Lit(1), Lit(2)).evaluate()", &call0(&sum, "evaluate")?);

    section("Add Mul by extending each algebra");
    let config = MergeConfig::builder()
        .name("Arithmetic")
        .instrument_operations(instrument)
        .build();
    let constituents: [Arc<dyn Algebra>; 3] = [mul_data()?, mul_print()?, mul_evaluate()?];
    let m = instantiate(merge_with_config(&constituents, config)?)?;
    show_family(&m);

    let product = m.call("Mul", &[m.call("Lit", &[2.into()])?, m.call("Lit", &[3.into()])?])?;
    outcome("Mul(Lit(2), Lit(3)).print()", &call0(&product, "print")?);
    outcome("Mul(Lit(2), Lit(3)).evaluate()", &call0(&product, "evaluate")?);

    let mixed = m.call("Add", &[m.call("Lit", &[1.into()])?, product])?;
    outcome("Add(Lit(1), Mul(..)).print()", &call0(&mixed, "print")?);
    outcome("Add(Lit(1), Mul(..)).evaluate()", &call0(&mixed, "evaluate")?);
    Ok(())
}

fn run_vars() -> Result<()> {
    header("VARIABLES — evaluation against a shared scope");

    let scope = Scope::new();
    let v = instantiate(var_family(scope.clone())?)?;
    show_family(&v);

    let lit = |n: i64| v.call("Lit", &[n.into()]);
    let assign = v.call(
        "Assign",
        &["x".into(), v.call("Mul", &[lit(6)?, lit(7)?])?],
    )?;
    outcome("print", &call0(&assign, "print")?);
    outcome("evaluate", &call0(&assign, "evaluate")?);
    step(&format!("scope now holds x = {:?}", scope.get("x")));

    let read = v.call("Add", &[v.call("Var", &["x".into()])?, lit(1)?])?;
    outcome(&call0(&read, "print")?.as_text()?.to_string(), &call0(&read, "evaluate")?);

    let unbound = v.call("Var", &["y".into()])?;
    match unbound.call("evaluate", &[]) {
        Err(e) => step(&format!("y.evaluate() fails: {}", e.to_string().bright_red())),
        Ok(value) => outcome("y.evaluate()", &value),
    }
    Ok(())
}

fn run_point() -> Result<()> {
    header("POINTS — add reads coordinates from the data algebra");

    let p = instantiate(point_family()?)?;
    show_family(&p);

    let ints = |xs: &[i64]| xs.iter().map(|x| Value::Int(*x)).collect::<Vec<_>>();

    let sum = p
        .call("Point2", &ints(&[1, 2]))?
        .call("add", &[p.call("Point2", &ints(&[3, 4]))?])?;
    outcome("Point2(1,2).add(Point2(3,4)).print()", &call0(&sum, "print")?);

    let sum = p
        .call("Point3", &ints(&[1, 2, 3]))?
        .call("add", &[p.call("Point3", &ints(&[4, 5, 6]))?])?;
    outcome("Point3(1,2,3).add(Point3(4,5,6)).print()", &call0(&sum, "print")?);
    show_result("Point3(5, 7, 9)", &sum)
}

fn parse_color(c: &AlgebraInstance, name: &str) -> Result<Value> {
    if let Some((case, _)) = NAMED_COLORS
        .iter()
        .find(|(case, _)| case.eq_ignore_ascii_case(name))
    {
        return c.call(case, &[]);
    }

    let channels = name
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| AlgebraError::custom(format!("Unknown color: {}", name)))
        })
        .collect::<Result<Vec<_>>>()?;
    c.call("Rgb", &channels)
}

fn run_color(name: &str) -> Result<()> {
    header("COLORS — two renderings of the same cases");

    let c = instantiate(color_family()?)?;
    show_family(&c);

    let color = parse_color(&c, name)?;
    outcome(&format!("{}.toHex()", name), &call0(&color, "toHex")?);
    outcome(&format!("{}.toRgb()", name), &call0(&color, "toRgb")?);
    Ok(())
}

fn run_list(separator: &str, items: &[i64]) -> Result<()> {
    header("LISTS — recursive construction through the merged family");

    let l = list_family()?.instantiate(&ConstructionContext::new().with_arg(separator))?;
    show_family(&l);
    step(&format!("instance fields: {}", l.snapshot()));

    let build = |items: &[i64]| {
        items.iter().rev().try_fold(l.call("Nil", &[])?, |tail, item| {
            l.call("Cons", &[Value::Int(*item), tail])
        })
    };

    let first = build(items)?;
    let second = build(&[7, 8, 9])?;
    outcome("first.print()", &call0(&first, "print")?);
    outcome("first.length()", &call0(&first, "length")?);

    section("Concatenate");
    let joined = first.call("concat", &[second])?;
    outcome("first.concat(second).print()", &call0(&joined, "print")?);
    outcome("first.concat(second).length()", &call0(&joined, "length")?);
    outcome("first.concat(second).toList()", &call0(&joined, "toList")?);
    Ok(())
}

fn run_all(instrument: bool) -> Result<()> {
    run_bool()?;
    run_peano(3)?;
    run_expr(instrument)?;
    run_vars()?;
    run_point()?;
    run_color("Red")?;
    run_list(DEFAULT_SEPARATOR, &[1, 2, 3])
}

// ─── Entry point ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::TRACE.into()),
            )
            .init();
    }

    let result = match cli.command {
        Commands::Bool => run_bool(),
        Commands::Peano { n } => run_peano(n),
        Commands::Expr => run_expr(cli.verbose),
        Commands::Vars => run_vars(),
        Commands::Point => run_point(),
        Commands::Color { name } => run_color(&name),
        Commands::List { separator, items } => run_list(&separator, &items),
        Commands::All => run_all(cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("\n  {} {}", "✗".bright_red().bold(), e.to_string().bright_red());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call0_invokes_capability_without_arguments() {
        let n = instantiate(peano_family().unwrap()).unwrap();
        let three = peano(&n, 3).unwrap();
        assert_eq!(call0(&three, "toNumber").unwrap(), Value::Int(3));
        assert!(call0(&three, "print").is_err());
    }

    #[test]
    fn test_every_tour_runs() {
        run_all(false).unwrap();
    }
}
