use std::io::Write;

use clap::Parser;

use taginfo_gen::{cli, mapping, taginfo};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse();
    let reader = args.mapping_file.clone().into_reader()?;
    let schema = mapping::Mapping::from_reader(reader)?;
    let document = taginfo::Document::new(taginfo_gen::extract(&schema));
    let mut writer = args.output.clone().into_writer()?;
    taginfo_gen::render(&mut writer, &document)?;
    writeln!(writer)?;
    Ok(())
}
