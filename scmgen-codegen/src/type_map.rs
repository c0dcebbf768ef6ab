// Catalog type name → C++/docs type mapping, plus coordinate vectorization.

use std::collections::HashMap;

use regex::Regex;

use crate::catalog::Catalog;
use crate::naming;
use crate::schema::{Command, Param};

/// Parameter transform for one run: type-mapping tables built from the
/// catalog (enum names, class names, fixed aliases) and the x/y(/z)
/// coordinate folding.
pub struct TypeMapper {
    /// Applied to input parameter types when emitting handler code.
    input_map: HashMap<String, String>,
    /// Applied to output parameter types when emitting handler code.
    output_map: HashMap<String, String>,
    vectorize_params: bool,
    /// Strips a literal leading or trailing coordinate letter from a name.
    coord_strip: Regex,
    handle_strip: Regex,
}

impl TypeMapper {
    pub fn new(catalog: &Catalog, vectorize_params: bool) -> Self {
        // Types mapped for both input and output parameters.
        let mut shared: HashMap<String, String> = HashMap::new();
        shared.insert("model_char".into(), "eModelID".into());
        shared.insert("model_vehicle".into(), "eModelID".into());
        for e in &catalog.enums {
            shared.insert(e.clone(), format!("e{e}"));
        }
        for cmd in catalog.all_commands() {
            if let Some(class) = &cmd.class_name {
                shared.insert(class.clone(), format!("C{class}"));
            }
        }

        let output_map = shared.clone();

        // Additional mappings for input parameters only.
        let mut input_map = shared;
        input_map.insert("Char".into(), "CPed".into());
        input_map.insert("Car".into(), "CVehicle".into());
        input_map.insert("string".into(), "std::string_view".into());
        input_map.insert("label".into(), "std::string_view".into());
        input_map.insert("int".into(), "int32".into());

        TypeMapper {
            input_map,
            output_map,
            vectorize_params,
            coord_strip: Regex::new("(?i)x$|^x").expect("coord strip regex"),
            handle_strip: Regex::new("(?i)handle$|^handle").expect("handle strip regex"),
        }
    }

    /// Fold runs of 2-3 consecutive x/y(/z) parameters into one vector-typed
    /// parameter. The fold is adjacency-sensitive on purpose: a parameter
    /// counts as a coordinate when its name starts or ends with the
    /// coordinate letter (case-insensitive), which is a heuristic, not a
    /// parse. No-op when vectorization is disabled.
    pub fn vectorize(&self, params: &[Param], for_handler: bool) -> Vec<Param> {
        if !self.vectorize_params {
            return params.to_vec();
        }

        let mut out = Vec::with_capacity(params.len());
        let mut i = 0;
        while i < params.len() {
            if i + 1 < params.len()
                && is_coord_param(&params[i].name, 'x')
                && is_coord_param(&params[i + 1].name, 'y')
            {
                // Synthetic name: the x-parameter's name with the coordinate
                // letter stripped, camel-cased; may end up empty.
                let name =
                    naming::to_camel_case(&self.coord_strip.replace_all(&params[i].name, ""));
                if i + 2 < params.len() && is_coord_param(&params[i + 2].name, 'z') {
                    out.push(Param {
                        name,
                        param_type: if for_handler { "CVector" } else { "Vector" }.into(),
                    });
                    i += 3;
                } else {
                    out.push(Param {
                        name,
                        param_type: if for_handler { "CVector2D" } else { "Vector2D" }.into(),
                    });
                    i += 2;
                }
            } else {
                out.push(params[i].clone());
                i += 1;
            }
        }
        out
    }

    /// Transform a command's input parameters for docs (`for_handler` false)
    /// or for the handler signature (`for_handler` true).
    pub fn transform_inputs(&self, command: &Command, for_handler: bool) -> Vec<Param> {
        let is_static = command.attrs.is_static;

        let mut out = Vec::new();
        for (i, mut param) in self
            .vectorize(&command.input, for_handler)
            .into_iter()
            .enumerate()
        {
            // Common case of a class static function whose first parameter is
            // the handle of the instance: retype it to the class itself.
            if let Some(class) = &command.class_name {
                if is_static && i == 0 && param.name == "handle" {
                    param.param_type = if for_handler {
                        format!("C{class}")
                    } else {
                        class.clone()
                    };
                    let stripped =
                        naming::to_camel_case(&self.handle_strip.replace_all(&param.name, ""));
                    param.name = if stripped.is_empty() {
                        class.to_lowercase()
                    } else {
                        stripped
                    };
                }
            }

            // Apply the C++ type mappings for handler inputs and decorate
            // class types with a pointer/reference.
            if for_handler {
                if let Some(mapped) = self.input_map.get(&param.param_type) {
                    param.param_type = mapped.clone();
                }
                if param.param_type.starts_with('C')
                    && !param.param_type.ends_with('*')
                    && !param.param_type.ends_with('&')
                {
                    param
                        .param_type
                        .push(if is_static && i == 0 { '*' } else { '&' });
                }
            }

            param.name = naming::escape_reserved(&param.name);
            out.push(param);
        }
        out
    }

    /// Transform a command's output parameters; the output type mapping is
    /// only applied when emitting handler code.
    pub fn transform_outputs(&self, params: &[Param], for_handler: bool) -> Vec<Param> {
        self.vectorize(params, for_handler)
            .into_iter()
            .map(|mut param| {
                if for_handler {
                    if let Some(mapped) = self.output_map.get(&param.param_type) {
                        param.param_type = mapped.clone();
                    }
                }
                param
            })
            .collect()
    }
}

fn is_coord_param(name: &str, coord: char) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.starts_with(coord) || lower.ends_with(coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::schema::{CommandAttrs, Extension};

    fn param(name: &str, param_type: &str) -> Param {
        Param {
            name: name.into(),
            param_type: param_type.into(),
        }
    }

    fn command(name: &str, class: Option<&str>, input: Vec<Param>) -> Command {
        Command {
            id: "0000".into(),
            name: name.into(),
            num_params: input.len() as u32,
            short_desc: None,
            input,
            output: vec![],
            class_name: class.map(str::to_string),
            member: None,
            operator: None,
            attrs: CommandAttrs::default(),
        }
    }

    fn catalog_with(commands: Vec<Command>, enums: &[&str]) -> Catalog {
        Catalog {
            extensions: vec![Extension {
                name: "default".into(),
                commands,
            }],
            enums: enums.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn mapper() -> TypeMapper {
        let cat = catalog_with(vec![command("DUMMY", Some("Ped"), vec![])], &["WeaponType"]);
        TypeMapper::new(&cat, true)
    }

    #[test]
    fn test_vectorize_xyz_triple() {
        let m = mapper();
        let params = vec![
            param("startX", "float"),
            param("startY", "float"),
            param("startZ", "float"),
            param("other", "int"),
        ];
        let out = m.vectorize(&params, true);
        assert_eq!(out, vec![param("start", "CVector"), param("other", "int")]);

        let docs = m.vectorize(&params, false);
        assert_eq!(docs[0], param("start", "Vector"));
    }

    #[test]
    fn test_vectorize_xy_pair_at_end() {
        let m = mapper();
        let params = vec![param("posX", "float"), param("posY", "float")];
        let out = m.vectorize(&params, true);
        assert_eq!(out, vec![param("pos", "CVector2D")]);
    }

    #[test]
    fn test_vectorize_lone_x_untouched() {
        let m = mapper();
        let params = vec![param("posX", "float"), param("radius", "float")];
        let out = m.vectorize(&params, true);
        assert_eq!(out, params);
    }

    #[test]
    fn test_vectorize_bare_coordinate_names() {
        let m = mapper();
        let params = vec![param("x", "float"), param("y", "float"), param("z", "float")];
        let out = m.vectorize(&params, false);
        assert_eq!(out, vec![param("", "Vector")]);
    }

    #[test]
    fn test_vectorize_disabled_is_noop() {
        let cat = catalog_with(vec![], &[]);
        let m = TypeMapper::new(&cat, false);
        let params = vec![param("startX", "float"), param("startY", "float")];
        assert_eq!(m.vectorize(&params, true), params);
    }

    #[test]
    fn test_static_handle_substitution() {
        let mut cmd = command(
            "GET_CHAR_HEALTH",
            Some("Ped"),
            vec![param("handle", "int"), param("healthX", "int")],
        );
        cmd.attrs.is_static = true;

        let cat = catalog_with(vec![cmd.clone()], &[]);
        let m = TypeMapper::new(&cat, true);

        let out = m.transform_inputs(&cmd, true);
        assert_eq!(out[0], param("ped", "CPed*"));

        // Docs context keeps the bare class name, no pointer decoration.
        let docs = m.transform_inputs(&cmd, false);
        assert_eq!(docs[0], param("ped", "Ped"));
    }

    #[test]
    fn test_input_type_mapping_and_reference_decoration() {
        let cmd = command(
            "EXPLODE_CHAR_HEAD",
            None,
            vec![
                param("ped", "Char"),
                param("weapon", "WeaponType"),
                param("text", "string"),
                param("time", "int"),
            ],
        );
        let cat = catalog_with(vec![cmd.clone()], &["WeaponType"]);
        let m = TypeMapper::new(&cat, true);

        let out = m.transform_inputs(&cmd, true);
        assert_eq!(out[0], param("ped", "CPed&"));
        assert_eq!(out[1], param("weapon", "eWeaponType"));
        assert_eq!(out[2], param("text", "std::string_view"));
        assert_eq!(out[3], param("time", "int32"));

        // Docs context applies no input mapping at all.
        let docs = m.transform_inputs(&cmd, false);
        assert_eq!(docs[0], param("ped", "Char"));
        assert_eq!(docs[3], param("time", "int"));
    }

    #[test]
    fn test_vectorized_input_gets_reference() {
        let cmd = command(
            "SET_CHAR_COORDINATES",
            None,
            vec![
                param("x", "float"),
                param("y", "float"),
                param("z", "float"),
            ],
        );
        let cat = catalog_with(vec![cmd.clone()], &[]);
        let m = TypeMapper::new(&cat, true);
        let out = m.transform_inputs(&cmd, true);
        assert_eq!(out[0].param_type, "CVector&");
    }

    #[test]
    fn test_reserved_keyword_name_is_suffixed() {
        let cmd = command("SET_OPERATOR", None, vec![param("operator", "int")]);
        let cat = catalog_with(vec![cmd.clone()], &[]);
        let m = TypeMapper::new(&cat, true);
        let out = m.transform_inputs(&cmd, true);
        assert_eq!(out[0].name, "operator_");
    }

    #[test]
    fn test_output_mapping_only_for_handler() {
        let m = mapper();
        let params = vec![param("ped", "Ped"), param("weapon", "WeaponType")];
        let handler = m.transform_outputs(&params, true);
        assert_eq!(handler[0], param("ped", "CPed"));
        assert_eq!(handler[1], param("weapon", "eWeaponType"));

        let docs = m.transform_outputs(&params, false);
        assert_eq!(docs, params);
    }
}
