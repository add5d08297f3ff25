//! Canned API payloads and poster images.
//!
//! Payloads live in `samples/` next to this crate and mirror real responses
//! from the metadata API, trimmed to the fields reelguess reads.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub const MOVIE_GENRES: &str = include_str!("../samples/genre_movie_list.json");
pub const TV_GENRES: &str = include_str!("../samples/genre_tv_list.json");
pub const DISCOVER_MOVIES_PAGE_1: &str = include_str!("../samples/discover_movie_p1.json");
pub const DISCOVER_MOVIES_PAGE_2: &str = include_str!("../samples/discover_movie_p2.json");
pub const DISCOVER_TV_PAGE_1: &str = include_str!("../samples/discover_tv_p1.json");
pub const POPULAR_PEOPLE_PAGE_1: &str = include_str!("../samples/popular_people_p1.json");
pub const INCEPTION_DETAILS: &str = include_str!("../samples/movie_27205.json");
pub const INCEPTION_CREDITS: &str = include_str!("../samples/movie_27205_credits.json");
pub const NOLAN_DETAILS: &str = include_str!("../samples/person_525.json");
pub const NOLAN_CREDITS: &str = include_str!("../samples/person_525_credits.json");
pub const SEARCH_DARK_KNIGHT: &str = include_str!("../samples/search_movie_dark_knight.json");

pub const INCEPTION_ID: u64 = 27205;
pub const INTERSTELLAR_ID: u64 = 157336;
pub const DARK_KNIGHT_ID: u64 = 155;
pub const NOLAN_ID: u64 = 525;
pub const GAME_OF_THRONES_ID: u64 = 1399;

pub const INCEPTION_POSTER: &str = "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg";

/// A solid-color PNG of the given size.
pub fn poster_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode PNG fixture");
    buf.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelguess_types::{Credits, Entity, GenreList, Movie, Page, Person, PersonCredits};

    #[test]
    fn test_samples_decode_into_models() {
        let genres: GenreList = serde_json::from_str(MOVIE_GENRES).unwrap();
        assert_eq!(genres.genres.len(), 5);

        let page: Page<Movie> = serde_json::from_str(DISCOVER_MOVIES_PAGE_1).unwrap();
        assert_eq!(page.results[0].id, INCEPTION_ID);
        assert!(page.has_more());

        let people: Page<Person> = serde_json::from_str(POPULAR_PEOPLE_PAGE_1).unwrap();
        assert_eq!(people.results[0].known_for.len(), 2);

        let credits: Credits = serde_json::from_str(INCEPTION_CREDITS).unwrap();
        assert_eq!(credits.crew.len(), 4);

        let person_credits: PersonCredits = serde_json::from_str(NOLAN_CREDITS).unwrap();
        assert_eq!(person_credits.crew.len(), 5);

        let details: Movie = serde_json::from_str(INCEPTION_DETAILS).unwrap();
        assert_eq!(Entity::from(details).genre_ids(), vec![28, 878, 12]);
    }

    #[test]
    fn test_poster_png_decodes() {
        let bytes = poster_png(3, 5);
        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (3, 5));
    }
}
