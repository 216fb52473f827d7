use std::error::Error;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{ArgEnum, Parser};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use loop_gen::generator::RecordGenerator;
use loop_gen::profile::Profile;
use loop_gen::sink::{Batch, CsvSink};

#[derive(Debug, Clone, Copy, ArgEnum)]
enum BuiltinProfile {
    Brokerage,
    SoldTest,
}

impl BuiltinProfile {
    fn profile(self) -> Profile {
        match self {
            BuiltinProfile::Brokerage => Profile::brokerage(),
            BuiltinProfile::SoldTest => Profile::sold_test(),
        }
    }
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The built-in dataset profile to generate
    #[clap(long, arg_enum, default_value = "brokerage")]
    pub(crate) profile: BuiltinProfile,

    /// A JSON profile to use instead of a built-in one
    #[clap(long)]
    pub(crate) profile_file: Option<PathBuf>,

    /// Number of loops to generate (defaults to the profile's count)
    #[clap(long)]
    pub(crate) count: Option<usize>,

    /// The CSV file to write (defaults to the profile's output path)
    #[clap(long, short)]
    pub(crate) output: Option<PathBuf>,

    /// Id of the first loop
    #[clap(long)]
    pub(crate) base_id: Option<u64>,

    /// Seed for repeatable output
    #[clap(long)]
    pub(crate) seed: Option<u64>,

    /// Date the generation window is anchored to, as YYYY-MM-DD
    #[clap(long)]
    pub(crate) today: Option<NaiveDate>,

    /// Print the resolved profile as JSON and exit
    #[clap(long)]
    pub(crate) print_profile: bool,
}

impl Cli {
    fn resolve_profile(&self) -> Result<Profile, Box<dyn Error>> {
        let mut profile = match &self.profile_file {
            Some(path) => Profile::from_json_path(path)?,
            None => self.profile.profile(),
        };
        if let Some(count) = self.count {
            profile.record_count = count;
        }
        if let Some(output) = &self.output {
            profile.output_path = output.clone();
        }
        if let Some(base_id) = self.base_id {
            profile.base_id = base_id;
        }
        profile.validate()?;
        Ok(profile)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let profile = cli.resolve_profile()?;

    if cli.print_profile {
        println!("{}", profile.to_json()?);
        return Ok(());
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!("Generating {} profile anchored at {}", profile.name, today);

    let output = profile.output_path.clone();
    let batch = Batch::try_from(&profile)?;
    let mut generator = RecordGenerator::new(profile, rng, today)?;
    let mut sink = CsvSink::create(&output)?;
    let written = batch.run(&mut generator, &mut sink)?;

    info!("Generated {} records to {}", written, output.display());
    println!("Generated {} records to {}", written, output.display());
    Ok(())
}
