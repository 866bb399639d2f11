use std::collections::BTreeMap;

use super::*;
use crate::model::{CountResponse, User, UserUpdate};
use crate::rights::{self, R_API_USER_C, R_API_USER_D, R_API_USER_R, R_API_USER_U};

impl AdminClient {
    pub fn list_users(&mut self, params: &ListParams) -> Result<Vec<User>> {
        self.require(rights::USER_RIGHTS)?;
        let resp = self.send_authed("list users", |client, base, auth| {
            client
                .get(format!("{}/api/users", base))
                .header(reqwest::header::AUTHORIZATION, auth)
                .query(params)
        })?;
        resp.json().context("parse users")
    }

    pub fn count_users(&mut self, search: Option<&str>) -> Result<u64> {
        self.require(rights::USER_RIGHTS)?;
        let resp = self.send_authed("count users", |client, base, auth| {
            let req = client
                .get(format!("{}/api/users/count", base))
                .header(reqwest::header::AUTHORIZATION, auth);
            match search {
                Some(s) => req.query(&[("search", s)]),
                None => req,
            }
        })?;
        let count: CountResponse = resp.json().context("parse user count")?;
        Ok(count.count)
    }

    pub fn me(&mut self) -> Result<User> {
        self.require(&[R_API_USER_R])?;
        let resp = self.send_authed("current user", |client, base, auth| {
            client
                .get(format!("{}/api/users/me", base))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        resp.json().context("parse current user")
    }

    pub fn rights_catalogue(&mut self) -> Result<BTreeMap<String, Vec<String>>> {
        let resp = self.send_authed("rights catalogue", |client, base, auth| {
            client
                .get(format!("{}/api/users/rights", base))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        resp.json().context("parse rights catalogue")
    }

    pub fn get_user(&mut self, id: &str) -> Result<User> {
        self.require(&[R_API_USER_R])?;
        let resp = self.send_authed("get user", |client, base, auth| {
            client
                .get(format!("{}/api/users/{}", base, id))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        resp.json().context("parse user")
    }

    pub fn create_user(&mut self, request: &RegisterRequest) -> Result<User> {
        self.require(&[R_API_USER_C])?;
        let resp = self.send_authed("create user", |client, base, auth| {
            client
                .post(format!("{}/api/users", base))
                .header(reqwest::header::AUTHORIZATION, auth)
                .json(request)
        })?;
        resp.json().context("parse created user")
    }

    pub fn update_user(&mut self, id: &str, update: &UserUpdate) -> Result<User> {
        self.require(&[R_API_USER_U])?;
        let resp = self.send_authed("update user", |client, base, auth| {
            client
                .put(format!("{}/api/users/{}", base, id))
                .header(reqwest::header::AUTHORIZATION, auth)
                .json(update)
        })?;
        resp.json().context("parse updated user")
    }

    pub fn delete_user(&mut self, id: &str) -> Result<u64> {
        self.require(&[R_API_USER_D])?;
        let resp = self.send_authed("delete user", |client, base, auth| {
            client
                .delete(format!("{}/api/users/{}", base, id))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        let count: CountResponse = resp.json().context("parse delete count")?;
        Ok(count.count)
    }

    pub fn get_user_rights(&mut self, id: &str) -> Result<Vec<String>> {
        self.require(&[R_API_USER_U])?;
        let resp = self.send_authed("get user rights", |client, base, auth| {
            client
                .get(format!("{}/api/users/{}/rights", base, id))
                .header(reqwest::header::AUTHORIZATION, auth)
        })?;
        resp.json().context("parse user rights")
    }

    pub fn save_user_rights(&mut self, id: &str, codes: &[String]) -> Result<Vec<String>> {
        self.require(&[R_API_USER_U])?;
        let resp = self.send_authed("save user rights", |client, base, auth| {
            client
                .put(format!("{}/api/users/{}/rights", base, id))
                .header(reqwest::header::AUTHORIZATION, auth)
                .json(codes)
        })?;
        resp.json().context("parse saved rights")
    }
}
