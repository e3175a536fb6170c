//! The bundled sample film.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{Director, Genre, Movie, Starring};

/// Release date of the sample film.
pub fn release_date() -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(1998, 11, 27)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// "Everything's Gonna Be Great" with its genres, cast and director.
pub fn everything_gonna_be_great() -> Movie {
    Movie {
        name: "Everything's Gonna Be Great".to_string(),
        name_de: "Alles wird gut".to_string(),
        name_tr: "Herşey Çok Güzel Olacak".to_string(),
        initial_release_date: release_date(),
        genre: vec![Genre::named("Comedy"), Genre::named("Drama")],
        starring: vec![
            Starring::role("Cem Yılmaz", "Altan Camli"),
            Starring::role("Mazhar Alanson", "Nuri Camli"),
            Starring::role("Ceyda Düvenci", "Ayla Camli"),
            Starring::role("Selim Nasit", "Cevat Camli"),
            Starring::role("Mustafa Uzunyilmaz", "Nusret"),
        ],
        director: vec![Director::named("Ömer Vargi")],
        ..Movie::default()
    }
}
