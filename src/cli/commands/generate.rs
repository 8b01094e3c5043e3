use anyhow::Result;
use clap::Args;

use super::report;
use crate::cli::CommandContext;
use crate::compose::SecurityLevel;
use crate::generate::Generator;
use crate::render::Platform;

#[derive(Args)]
pub struct GenerateArgs {
    /// Security level: 1 (basic), 2 (enhanced) or 3 (maximum)
    #[arg(short, long, value_name = "LEVEL")]
    pub level: SecurityLevel,

    /// Detector command dialect: auto, posix or windows [default: from config]
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<Platform>,
}

pub async fn execute(args: GenerateArgs, ctx: &CommandContext) -> Result<()> {
    generate_and_write(ctx, args.level, args.platform)
}

/// No subcommand: maximum security, configured platform
pub async fn quick(ctx: &CommandContext) -> Result<()> {
    ctx.output.info("Quick mode: generating at security level 3 (maximum)");
    generate_and_write(ctx, SecurityLevel::Maximum, None)
}

pub(crate) fn generate_and_write(
    ctx: &CommandContext,
    level: SecurityLevel,
    platform: Option<Platform>,
) -> Result<()> {
    let generator = Generator::from_config(&ctx.config, platform)?;
    ctx.output.step(&format!("Scanning {}", ctx.root().display()));

    let plan = generator.plan(ctx.root(), level)?;
    let written = generator.write_plan(ctx.root(), &plan)?;

    report::print_summary(&ctx.output, &plan, &written);
    Ok(())
}
