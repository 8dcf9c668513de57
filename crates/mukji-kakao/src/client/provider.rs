//! [`KakaoClient`] as the app's place-search and reverse-geocoding backend.

use mukji_core::{KeywordQuery, LatLng, PlaceSearch, ReverseGeocoder, SearchPage};

use super::KakaoClient;
use crate::error::KakaoError;
use crate::normalize::{address_from_response, search_page_from_response};

impl PlaceSearch for KakaoClient {
    type Error = KakaoError;

    async fn search_page(&self, query: &KeywordQuery) -> Result<SearchPage, KakaoError> {
        let response = self.search_keyword(query).await?;
        Ok(search_page_from_response(response))
    }
}

impl ReverseGeocoder for KakaoClient {
    type Error = KakaoError;

    async fn address_of(&self, point: LatLng) -> Result<Option<String>, KakaoError> {
        let response = self.coord_to_address(point).await?;
        Ok(address_from_response(&response))
    }
}
