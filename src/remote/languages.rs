use super::*;
use crate::model::{CountResponse, Culture, Language, LanguageResource};
use crate::repository::Pagination;
use crate::rights::{
    self, R_API_LANGUAGE_C, R_API_LANGUAGE_D, R_API_LANGUAGE_R, R_API_LANGUAGE_RESOURCE_C,
    R_API_LANGUAGE_RESOURCE_D, R_API_LANGUAGE_RESOURCE_U, R_API_LANGUAGE_U,
};

impl AdminClient {
    pub fn cultures(&self) -> Result<Vec<Culture>> {
        let resp = self
            .client
            .get(self.url("/api/languages/cultures"))
            .send()
            .context("cultures")?;
        self.ensure_ok(resp, "cultures")?
            .json()
            .context("parse cultures")
    }

    pub fn display(&self, culture: &str) -> Result<Vec<LanguageResource>> {
        let resp = self
            .client
            .get(self.url(&format!("/api/languages/{}/display", culture)))
            .send()
            .context("display")?;
        self.ensure_ok(resp, "display")?
            .json()
            .context("parse display resources")
    }

    pub fn list_languages(&mut self, pagination: &Pagination) -> Result<Vec<Language>> {
        self.require(rights::LANGUAGE_RIGHTS)?;
        let resp = self.send_authed("list languages", |client, base, auth| {
            client
                .get(format!("{}/api/languages", base))
                .header(reqwest::header::AUTHORIZATION, auth)
                .query(pagination)
        })?;
        resp.json().context("parse languages")
    }

    pub fn count_languages(&mut self) -> Result<u64> {
        self.require(rights::LANGUAGE_RIGHTS)?;
        let resp = self.send_authed("count languages", |client, base, auth| {
            client
                .get(format!("{}/api/languages/count", base))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        let count: CountResponse = resp.json().context("parse language count")?;
        Ok(count.count)
    }

    pub fn get_language(&mut self, id: &str) -> Result<Language> {
        self.require(&[R_API_LANGUAGE_R, R_API_LANGUAGE_U])?;
        let resp = self.send_authed("get language", |client, base, auth| {
            client
                .get(format!("{}/api/languages/{}", base, id))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        resp.json().context("parse language")
    }

    pub fn create_language(&mut self, language: &Language) -> Result<Language> {
        self.require(&[R_API_LANGUAGE_C])?;
        let resp = self.send_authed("create language", |client, base, auth| {
            client
                .post(format!("{}/api/languages", base))
                .header(reqwest::header::AUTHORIZATION, auth)
                .json(language)
        })?;
        resp.json().context("parse created language")
    }

    pub fn update_language(&mut self, id: &str, language: &Language) -> Result<Language> {
        self.require(&[R_API_LANGUAGE_U])?;
        let resp = self.send_authed("update language", |client, base, auth| {
            client
                .put(format!("{}/api/languages/{}", base, id))
                .header(reqwest::header::AUTHORIZATION, auth)
                .json(language)
        })?;
        resp.json().context("parse updated language")
    }

    pub fn delete_language(&mut self, id: &str) -> Result<u64> {
        self.require(&[R_API_LANGUAGE_D])?;
        let resp = self.send_authed("delete language", |client, base, auth| {
            client
                .delete(format!("{}/api/languages/{}", base, id))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        let count: CountResponse = resp.json().context("parse delete count")?;
        Ok(count.count)
    }

    pub fn list_resources(
        &mut self,
        lang_id: &str,
        params: &ListParams,
    ) -> Result<Vec<LanguageResource>> {
        self.require(rights::LANGUAGE_RESOURCE_RIGHTS)?;
        let resp = self.send_authed("list resources", |client, base, auth| {
            client
                .get(format!("{}/api/languages/{}/resources", base, lang_id))
                .header(reqwest::header::AUTHORIZATION, auth)
                .query(params)
        })?;
        resp.json().context("parse resources")
    }

    pub fn count_resources(&mut self, lang_id: &str, search: Option<&str>) -> Result<u64> {
        self.require(rights::LANGUAGE_RESOURCE_RIGHTS)?;
        let resp = self.send_authed("count resources", |client, base, auth| {
            let req = client
                .get(format!("{}/api/languages/{}/resources/count", base, lang_id))
                .header(reqwest::header::AUTHORIZATION, auth);
            match search {
                Some(s) => req.query(&[("search", s)]),
                None => req,
            }
        })?;
        let count: CountResponse = resp.json().context("parse resource count")?;
        Ok(count.count)
    }

    pub fn create_resource(
        &mut self,
        lang_id: &str,
        resource: &LanguageResource,
    ) -> Result<LanguageResource> {
        self.require(&[R_API_LANGUAGE_RESOURCE_C])?;
        let resp = self.send_authed("create resource", |client, base, auth| {
            client
                .post(format!("{}/api/languages/{}/resources", base, lang_id))
                .header(reqwest::header::AUTHORIZATION, auth)
                .json(resource)
        })?;
        resp.json().context("parse created resource")
    }

    pub fn update_resource(
        &mut self,
        lang_id: &str,
        id: &str,
        resource: &LanguageResource,
    ) -> Result<LanguageResource> {
        self.require(&[R_API_LANGUAGE_RESOURCE_U])?;
        let resp = self.send_authed("update resource", |client, base, auth| {
            client
                .put(format!("{}/api/languages/{}/resources/{}", base, lang_id, id))
                .header(reqwest::header::AUTHORIZATION, auth)
                .json(resource)
        })?;
        resp.json().context("parse updated resource")
    }

    pub fn delete_resource(&mut self, lang_id: &str, id: &str) -> Result<u64> {
        self.require(&[R_API_LANGUAGE_RESOURCE_D])?;
        let resp = self.send_authed("delete resource", |client, base, auth| {
            client
                .delete(format!("{}/api/languages/{}/resources/{}", base, lang_id, id))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        let count: CountResponse = resp.json().context("parse delete count")?;
        Ok(count.count)
    }
}
