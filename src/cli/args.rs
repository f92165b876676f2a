// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Turns template[:dest] arguments into rendering jobs

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::generate::{Delimiters, Job};

#[derive(Parser)]
#[command(name = "envgen")]
#[command(about = "Render configuration file templates from the process environment")]
#[command(version)]
pub struct Args {
    #[arg(
        required = true,
        help = "Template jobs as template[:dest]. An omitted or empty dest renders to stdout; a directory template renders every direct entry"
    )]
    pub jobs: Vec<String>,

    #[arg(
        short = 'd',
        long = "delims",
        help = "Template tag delimiters as \"left:right\" (default \"{{:}}\")"
    )]
    pub delims: Option<String>,

    #[arg(
        short = 'n',
        long = "no-overwrite",
        help = "Do not overwrite destination files that already exist"
    )]
    pub no_overwrite: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse job arguments from template[:dest] format
    pub fn parse_jobs(specs: &[String]) -> Result<Vec<Job>> {
        specs.iter().map(|spec| parse_job(spec)).collect()
    }
}

fn parse_job(spec: &str) -> Result<Job> {
    if !spec.contains(':') {
        return Ok(Job::to_stdout(spec));
    }

    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 2 {
        return Err(anyhow!(
            "bad template argument: {}. expected \"/template:/dest\"",
            spec
        ));
    }

    let dest = if parts[1].is_empty() {
        None
    } else {
        Some(PathBuf::from(parts[1]))
    };

    Ok(Job::new(parts[0], dest))
}

/// Parse the delimiter pair from "left:right" format
pub fn parse_delimiters(spec: &str) -> Result<Delimiters> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 2 {
        return Err(anyhow!(
            "bad delimiters argument: {}. expected \"left:right\"",
            spec
        ));
    }

    Ok(Delimiters::new(parts[0], parts[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jobs() {
        let specs = vec![
            "nginx.tmpl:/etc/nginx/nginx.conf".to_string(),
            "motd.tmpl".to_string(),
            "app.tmpl:".to_string(),
        ];

        let jobs = Args::parse_jobs(&specs).unwrap();

        assert_eq!(jobs[0].template, PathBuf::from("nginx.tmpl"));
        assert_eq!(jobs[0].dest, Some(PathBuf::from("/etc/nginx/nginx.conf")));
        assert_eq!(jobs[1].dest, None);
        // an empty dest part also means stdout
        assert_eq!(jobs[2].template, PathBuf::from("app.tmpl"));
        assert_eq!(jobs[2].dest, None);
    }

    #[test]
    fn test_parse_jobs_invalid() {
        let specs = vec!["a:b:c".to_string()];
        let result = Args::parse_jobs(&specs);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_delimiters() {
        let delims = parse_delimiters("[[:]]").unwrap();
        assert_eq!(delims.left, "[[");
        assert_eq!(delims.right, "]]");
    }

    #[test]
    fn test_parse_delimiters_invalid() {
        assert!(parse_delimiters("<%").is_err());
        assert!(parse_delimiters("a:b:c").is_err());
    }
}
