// ==========================================
// 水质检测年度排期系统 - 整数规划模型
// ==========================================
// 职责: 与具体求解器无关的模型描述
// 变量: 布尔 / 有界整数；约束: 整系数线性 (=, <=, >=)；目标: 线性最小化
// ==========================================

use std::fmt;

/// 变量句柄（模型内下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// 变量定义域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    Bool,
    Int { lb: i64, ub: i64 },
}

impl VarDomain {
    pub fn lower(&self) -> i64 {
        match self {
            VarDomain::Bool => 0,
            VarDomain::Int { lb, .. } => *lb,
        }
    }

    pub fn upper(&self) -> i64 {
        match self {
            VarDomain::Bool => 1,
            VarDomain::Int { ub, .. } => *ub,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.lower() && value <= self.upper()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDef {
    pub name: String,
    pub domain: VarDomain,
}

// ==========================================
// LinearExpr - 线性表达式 Σ coef * var + constant
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, i64)>,
    pub constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Σ var（系数均为 1）
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1)).collect(),
            constant: 0,
        }
    }

    pub fn add_term(&mut self, var: VarId, coef: i64) -> &mut Self {
        self.terms.push((var, coef));
        self
    }

    pub fn add_constant(&mut self, value: i64) -> &mut Self {
        self.constant += value;
        self
    }

    /// 按变量取值求值
    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms
            .iter()
            .map(|(var, coef)| coef * values.get(var.index()).copied().unwrap_or(0))
            .sum::<i64>()
            + self.constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Eq => write!(f, "="),
            Comparison::Le => write!(f, "<="),
            Comparison::Ge => write!(f, ">="),
        }
    }
}

// ==========================================
// LinearConstraint - expr (cmp) rhs
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub name: String,
    pub expr: LinearExpr,
    pub cmp: Comparison,
    pub rhs: i64,
}

impl LinearConstraint {
    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.cmp {
            Comparison::Eq => lhs == self.rhs,
            Comparison::Le => lhs <= self.rhs,
            Comparison::Ge => lhs >= self.rhs,
        }
    }
}

// ==========================================
// IntegerProgram - 模型
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerProgram {
    name: String,
    vars: Vec<VarDef>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl IntegerProgram {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn new_bool_var(&mut self, name: String) -> VarId {
        self.push_var(name, VarDomain::Bool)
    }

    pub fn new_int_var(&mut self, lb: i64, ub: i64, name: String) -> VarId {
        self.push_var(name, VarDomain::Int { lb, ub })
    }

    fn push_var(&mut self, name: String, domain: VarDomain) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarDef { name, domain });
        id
    }

    pub fn add_constraint(&mut self, name: String, expr: LinearExpr, cmp: Comparison, rhs: i64) {
        self.constraints.push(LinearConstraint {
            name,
            expr,
            cmp,
            rhs,
        });
    }

    pub fn add_eq(&mut self, name: String, expr: LinearExpr, rhs: i64) {
        self.add_constraint(name, expr, Comparison::Eq, rhs);
    }

    pub fn add_le(&mut self, name: String, expr: LinearExpr, rhs: i64) {
        self.add_constraint(name, expr, Comparison::Le, rhs);
    }

    pub fn add_ge(&mut self, name: String, expr: LinearExpr, rhs: i64) {
        self.add_constraint(name, expr, Comparison::Ge, rhs);
    }

    /// 设置最小化目标（覆盖之前的目标）
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn vars(&self) -> &[VarDef] {
        &self.vars
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// 目标值
    pub fn objective_value(&self, values: &[i64]) -> i64 {
        self.objective.evaluate(values)
    }

    /// 取值是否满足全部变量域与约束
    pub fn is_feasible(&self, values: &[i64]) -> bool {
        values.len() == self.vars.len()
            && self
                .vars
                .iter()
                .zip(values)
                .all(|(def, &v)| def.domain.contains(v))
            && self.constraints.iter().all(|c| c.is_satisfied(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_evaluate() {
        let mut program = IntegerProgram::new("t");
        let x = program.new_bool_var("x".to_string());
        let y = program.new_int_var(0, 5, "y".to_string());

        let mut expr = LinearExpr::new();
        expr.add_term(x, 3).add_term(y, -2).add_constant(7);

        assert_eq!(expr.evaluate(&[1, 4]), 3 - 8 + 7);
        assert_eq!(expr.evaluate(&[0, 0]), 7);
    }

    #[test]
    fn test_is_feasible_checks_domains_and_constraints() {
        let mut program = IntegerProgram::new("t");
        let x = program.new_bool_var("x".to_string());
        let y = program.new_bool_var("y".to_string());
        program.add_eq("one".to_string(), LinearExpr::sum([x, y]), 1);

        assert!(program.is_feasible(&[1, 0]));
        assert!(!program.is_feasible(&[1, 1]));
        assert!(!program.is_feasible(&[2, -1]));
        assert!(!program.is_feasible(&[1]));
    }

    #[test]
    fn test_objective_value() {
        let mut program = IntegerProgram::new("t");
        let x = program.new_bool_var("x".to_string());
        let mut objective = LinearExpr::new();
        objective.add_term(x, 10);
        program.minimize(objective);

        assert_eq!(program.objective_value(&[1]), 10);
        assert_eq!(program.num_vars(), 1);
        assert_eq!(program.num_constraints(), 0);
    }
}
