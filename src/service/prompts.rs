use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::parser::Dialect;

const LOCATION_ABBREVIATIONS: &str = "BUSNBL = Business; METZGR = Metzger; TAEAST = TalbotEast; \
     SUTHLD ETHLEE AUD = Sutherland/Ethel; SOUBRU=Soubaru; feinbr = Feinberg;";

#[derive(Debug, Clone, Copy)]
pub struct PromptOptions {
    pub location_hints: bool,
    pub timezone: Tz,
}

/// Instructions sent as the system message of the extraction request.
pub fn system_prompt(dialect: Dialect, options: &PromptOptions, now: DateTime<Utc>) -> String {
    let local_now = now.with_timezone(&options.timezone);
    let mut prompt = format!(
        "You are a calendar data extraction assistant.\n\
         Current date (local, {tz}): {today}\n\
         Extract every event from the provided text with these fields:\n\
         - Date\n\
         - Time\n\
         - Title\n\
         - Location\n",
        tz = options.timezone.name(),
        today = local_now.format("%A, %B %-d, %Y"),
    );

    match dialect {
        Dialect::Block => prompt.push_str(
            "Return the data in this exact format for each event:\n\
             Date: [date]\n\
             Time: [time]\n\
             Title: [title]\n\
             Location: [location]\n\
             Separate each event with a blank line. Do not add any other text.\n",
        ),
        Dialect::Csv => prompt.push_str(
            "Return the data as CSV with the header line time,title,location \
             followed by exactly one line per event in the form time,title,location.\n\
             Do not use commas inside a value and do not add any other text.\n",
        ),
    }

    if options.location_hints {
        prompt.push_str(&format!(
            "Some of the Location fields are abbreviated, so please un-abbreviate them \
             based on these examples: {LOCATION_ABBREVIATIONS}\n\
             Look out for any other abbreviations and try your best to guess. \
             If the location seems like a proper noun, leave it as written.\n"
        ));
    }

    prompt
}
