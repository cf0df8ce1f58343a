// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Move type tags: the tagged union of primitive types,
//! vectors, and address-qualified struct references, plus the
//! `addr::module::name<arg,...>` string grammar and its parser.

use crate::{account_address::AccountAddress, error::Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
    pub type_args: Vec<TypeTag>,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{inner}>"),
            TypeTag::Struct(tag) => write!(f, "{tag}"),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_hex_literal(),
            self.module,
            self.name
        )?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "bool" => return Ok(TypeTag::Bool),
            "u8" => return Ok(TypeTag::U8),
            "u16" => return Ok(TypeTag::U16),
            "u32" => return Ok(TypeTag::U32),
            "u64" => return Ok(TypeTag::U64),
            "u128" => return Ok(TypeTag::U128),
            "u256" => return Ok(TypeTag::U256),
            "address" => return Ok(TypeTag::Address),
            "signer" => return Ok(TypeTag::Signer),
            _ => {},
        }
        if let Some(inner) = s.strip_prefix("vector<").and_then(|r| r.strip_suffix('>')) {
            return Ok(TypeTag::Vector(Box::new(inner.parse()?)));
        }
        Ok(TypeTag::Struct(Box::new(s.parse()?)))
    }
}

impl FromStr for StructTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_struct_tag(s)
    }
}

/// Parses `addr::module::name<arg,...>`, with arbitrarily nested generics,
/// using a hand-rolled scanner rather than a grammar library: the grammar
/// is small and the only hard part is tracking angle-bracket balance while
/// splitting on top-level commas.
fn parse_struct_tag(input: &str) -> Result<StructTag, Error> {
    let input = input.trim();
    let (head, type_args) = split_generics(input)?;

    let mut parts = head.splitn(3, "::");
    let address_str = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::TypeTagParse(format!("missing address in {input:?}")))?;
    let module = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::TypeTagParse(format!("missing module name in {input:?}")))?
        .to_string();
    let name = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::TypeTagParse(format!("missing struct name in {input:?}")))?
        .to_string();

    let address = AccountAddress::from_str_relaxed(address_str)
        .map_err(|e| Error::TypeTagParse(format!("bad address in {input:?}: {e}")))?;

    let type_args = type_args
        .into_iter()
        .map(|arg| arg.parse())
        .collect::<Result<Vec<TypeTag>, Error>>()?;

    Ok(StructTag {
        address,
        module,
        name,
        type_args,
    })
}

/// Splits `name<a, b<c>>` into `("name", ["a", "b<c>"])`. Returns a
/// *parse error* on unbalanced angle brackets.
fn split_generics(input: &str) -> Result<(&str, Vec<&str>), Error> {
    let open = match input.find('<') {
        None => return Ok((input, Vec::new())),
        Some(idx) => idx,
    };
    if !input.ends_with('>') {
        return Err(Error::TypeTagParse(format!(
            "unbalanced angle brackets in {input:?}"
        )));
    }
    let head = &input[..open];
    let inner = &input[open + 1..input.len() - 1];

    let mut args = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return Err(Error::TypeTagParse(format!(
                        "unbalanced angle brackets in {input:?}"
                    )));
                }
            },
            ',' if depth == 0 => {
                args.push(inner[start..i].trim());
                start = i + 1;
            },
            _ => {},
        }
    }
    if depth != 0 {
        return Err(Error::TypeTagParse(format!(
            "unbalanced angle brackets in {input:?}"
        )));
    }
    let last = inner[start..].trim();
    if last.is_empty() {
        return Err(Error::TypeTagParse(format!(
            "empty type argument in {input:?}"
        )));
    }
    args.push(last);
    Ok((head, args))
}
